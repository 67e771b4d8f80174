use std::cell::UnsafeCell;
use std::io;
mod debug;
mod getters;

/// Allocate the backing slots for a ring buffer of the given usable capacity.
///
/// One extra slot is allocated on top of `capacity` so that an empty and a
/// full buffer can be distinguished from the cursors alone. Every slot starts
/// out as `T::default()`.
///
/// Allocation failure is reported as `OutOfMemory` instead of aborting the
/// process, so a caller can fall back to a smaller capacity.
pub(crate) fn allocate_slots<T: Default>(capacity: usize) -> io::Result<Box<[UnsafeCell<T>]>> {
    if capacity == 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "Capacity must be greater than zero",
        ));
    }

    let slot_count = capacity.checked_add(1).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Capacity {capacity} overflows the slot count"),
        )
    })?;

    let mut slots: Vec<UnsafeCell<T>> = Vec::new();
    slots.try_reserve_exact(slot_count).map_err(|e| {
        io::Error::new(
            io::ErrorKind::OutOfMemory,
            format!(
                "Failed to allocate ring storage:\n\
                ├─ Capacity:   {capacity}\n\
                ├─ Slot count: {slot_count}\n\
                ╰─ Error: {e}"
            ),
        )
    })?;
    slots.resize_with(slot_count, || UnsafeCell::new(T::default()));

    Ok(slots.into_boxed_slice())
}

/// Storage of an uninitialized buffer: no slots at all.
pub(crate) fn empty_slots<T>() -> Box<[UnsafeCell<T>]> {
    Vec::new().into_boxed_slice()
}
