use crate::SPSC::RingBuffer;
use std::sync::atomic::{AtomicUsize, Ordering};

// Error codes
pub const CRB_SUCCESS: i32 = 0;
pub const CRB_ERROR_NULL_POINTER: i32 = -1;
pub const CRB_ERROR_INVALID_ARG: i32 = -2;
pub const CRB_ERROR_ALLOCATION_FAILED: i32 = -3;
pub const CRB_ERROR_FULL: i32 = -4;
pub const CRB_ERROR_EMPTY: i32 = -5;
pub const CRB_ERROR_CONTRACT: i32 = -6;

/// Handle to a byte ring (opaque pointer)
///
/// C callers do not get split handles, so the outstanding reservation of each
/// side lives here. `write_reserved` is only touched by the producer thread and
/// `read_reserved` only by the consumer thread; the atomics make the handle
/// `Sync` without adding any ordering of their own.
pub struct RingHandle {
    ring: RingBuffer<u8>,
    write_reserved: AtomicUsize,
    read_reserved: AtomicUsize,
}

// -----------------------------------------------------------------------------
// Lifecycle
// -----------------------------------------------------------------------------

/// Create a new byte ring.
///
/// # Arguments
/// * `capacity` - Usable capacity in bytes (> 0).
///
/// # Returns
/// * Pointer to `RingHandle`, or NULL on failure.
#[no_mangle]
pub extern "C" fn crb_new(capacity: usize) -> *mut RingHandle {
    match RingBuffer::with_capacity(capacity) {
        Ok(ring) => Box::into_raw(Box::new(RingHandle {
            ring,
            write_reserved: AtomicUsize::new(0),
            read_reserved: AtomicUsize::new(0),
        })),
        Err(e) => {
            eprintln!("FFI Error: Failed to create ring buffer: {}", e);
            std::ptr::null_mut()
        }
    }
}

/// Reallocate the ring for a new capacity, discarding its contents.
///
/// Must not be called while a producer or consumer thread uses the handle.
///
/// # Returns
/// * 0 on success, `CRB_ERROR_INVALID_ARG` for a zero capacity,
///   `CRB_ERROR_ALLOCATION_FAILED` if storage could not be allocated.
#[no_mangle]
pub extern "C" fn crb_resize(handle: *mut RingHandle, capacity: usize) -> i32 {
    if handle.is_null() {
        return CRB_ERROR_NULL_POINTER;
    }

    let handle = unsafe { &mut *handle };
    *handle.write_reserved.get_mut() = 0;
    *handle.read_reserved.get_mut() = 0;

    match handle.ring.resize(capacity) {
        Ok(()) => CRB_SUCCESS,
        Err(e) if e.kind() == std::io::ErrorKind::InvalidInput => CRB_ERROR_INVALID_ARG,
        Err(_) => CRB_ERROR_ALLOCATION_FAILED,
    }
}

/// Number of unread bytes.
#[no_mangle]
pub extern "C" fn crb_len(handle: *const RingHandle) -> usize {
    if handle.is_null() {
        return 0;
    }
    unsafe { (*handle).ring.len() }
}

/// Free a ring handle.
#[no_mangle]
pub extern "C" fn crb_free(handle: *mut RingHandle) {
    if !handle.is_null() {
        unsafe {
            let _ = Box::from_raw(handle); // Dropped automatically
        }
    }
}

// -----------------------------------------------------------------------------
// Producer API
// -----------------------------------------------------------------------------

/// Reserve contiguous free space.
///
/// # Arguments
/// * `handle` - Pointer to `RingHandle`.
/// * `out_data` - Receives the start of the reserved region.
/// * `size` - Input: minimum number of bytes needed. Output: bytes available.
///
/// # Returns
/// * 0 on success.
/// * `CRB_ERROR_FULL` if no large enough contiguous region is free right now.
#[no_mangle]
pub extern "C" fn crb_poke(handle: *mut RingHandle, out_data: *mut *mut u8, size: *mut usize) -> i32 {
    if handle.is_null() || out_data.is_null() || size.is_null() {
        return CRB_ERROR_NULL_POINTER;
    }

    let handle = unsafe { &*handle };
    let requested = unsafe { *size };
    if !handle.ring.accepts(requested) {
        return CRB_ERROR_INVALID_ARG;
    }

    let (start, len) = handle.ring.writable_run();
    if len < requested {
        return CRB_ERROR_FULL;
    }

    handle.write_reserved.store(len, Ordering::Relaxed);
    unsafe {
        *out_data = handle.ring.slots_mut(start, len).as_mut_ptr();
        *size = len;
    }
    CRB_SUCCESS
}

/// Publish `count` bytes written into the last reservation.
///
/// # Returns
/// * 0 on success, `CRB_ERROR_CONTRACT` if `count` exceeds the reservation.
#[no_mangle]
pub extern "C" fn crb_write(handle: *mut RingHandle, count: usize) -> i32 {
    if handle.is_null() {
        return CRB_ERROR_NULL_POINTER;
    }

    let handle = unsafe { &*handle };
    if count > handle.write_reserved.load(Ordering::Relaxed) {
        return CRB_ERROR_CONTRACT;
    }
    handle.ring.commit_write(count);
    handle.write_reserved.store(0, Ordering::Relaxed);
    CRB_SUCCESS
}

// -----------------------------------------------------------------------------
// Consumer API
// -----------------------------------------------------------------------------

/// Reserve contiguous unread data.
///
/// # Arguments
/// * `handle` - Pointer to `RingHandle`.
/// * `out_data` - Receives the start of the readable region.
/// * `size` - Input: minimum number of bytes needed. Output: bytes available.
///
/// # Returns
/// * 0 on success.
/// * `CRB_ERROR_EMPTY` if not enough contiguous data is available right now.
#[no_mangle]
pub extern "C" fn crb_peek(
    handle: *mut RingHandle,
    out_data: *mut *const u8,
    size: *mut usize,
) -> i32 {
    if handle.is_null() || out_data.is_null() || size.is_null() {
        return CRB_ERROR_NULL_POINTER;
    }

    let handle = unsafe { &*handle };
    let requested = unsafe { *size };
    if !handle.ring.accepts(requested) {
        return CRB_ERROR_INVALID_ARG;
    }

    let (start, len) = handle.ring.readable_run();
    if len < requested {
        return CRB_ERROR_EMPTY;
    }

    handle.read_reserved.store(len, Ordering::Relaxed);
    unsafe {
        *out_data = handle.ring.slots(start, len).as_ptr();
        *size = len;
    }
    CRB_SUCCESS
}

/// Release `count` bytes of the last read reservation.
///
/// # Returns
/// * 0 on success, `CRB_ERROR_CONTRACT` if `count` exceeds the reservation.
#[no_mangle]
pub extern "C" fn crb_read(handle: *mut RingHandle, count: usize) -> i32 {
    if handle.is_null() {
        return CRB_ERROR_NULL_POINTER;
    }

    let handle = unsafe { &*handle };
    if count > handle.read_reserved.load(Ordering::Relaxed) {
        return CRB_ERROR_CONTRACT;
    }
    handle.ring.commit_read(count);
    handle.read_reserved.store(0, Ordering::Relaxed);
    CRB_SUCCESS
}
