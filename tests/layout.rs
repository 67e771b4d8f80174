// Layout checks for the cursor block.
// The write and read cursors are hammered by different threads, so each must
// own its cache line. These tests print the observed values to aid debugging
// when a mismatch occurs on a given platform.
use contiguous_ringbuffer::SPSC::Buffer::layout::Cursors;
use crossbeam_utils::CachePadded;
use memoffset::offset_of;
use std::mem::{align_of, size_of};
use std::sync::atomic::AtomicUsize;

#[test]
fn test_cursor_layout() {
    let padded_size = size_of::<CachePadded<AtomicUsize>>();
    let padded_align = align_of::<CachePadded<AtomicUsize>>();

    let size = size_of::<Cursors>();
    let align = align_of::<Cursors>();
    let off_write = offset_of!(Cursors, write);
    let off_read = offset_of!(Cursors, read);

    println!(
        "Cursors => size: {size}, align: {align}, padded slot: {padded_size}/{padded_align}, offsets: [write:{off_write}, read:{off_read}]"
    );

    assert_eq!(off_write, 0);
    assert_eq!(off_read, padded_size);
    assert_eq!(off_read % padded_align, 0);
    assert_eq!(size, 2 * padded_size);
    assert_eq!(align, padded_align);
    assert!(off_read >= size_of::<AtomicUsize>());
}

#[cfg(target_arch = "x86_64")]
#[test]
fn test_cursor_layout_x86_64() {
    // Adjacent-line prefetching pairs lines, so each cursor gets 128 bytes.
    assert_eq!(offset_of!(Cursors, read), 128);
    assert_eq!(size_of::<Cursors>(), 256);
}
