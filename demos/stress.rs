// In demos/stress.rs
//
// Drives one producer and one consumer thread through a capacity-15 ring in
// fixed-size bursts, run after run, and checks that the consumed stream is
// byte-for-byte the produced one by comparing SHA-256 digests.
use contiguous_ringbuffer::RingBuffer;
use sha2::{Digest, Sha256};
use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

const ITEMS_PER_RUN: usize = 2000;
const CAPACITY: usize = 15;

fn main() -> std::io::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        eprintln!(
            "Usage: {} <runs> <producer_burst> <consumer_burst> [--auto-exit]",
            args[0]
        );
        std::process::exit(1);
    }

    let runs: usize = args[1].parse().expect("Invalid number of runs");
    let prod_burst: usize = args[2].parse().expect("Invalid producer burst");
    let cons_burst: usize = args[3].parse().expect("Invalid consumer burst");
    let auto_exit = args.get(4).map(|s| s == "--auto-exit").unwrap_or(false);

    if !burst_is_valid(prod_burst) || !burst_is_valid(cons_burst) {
        eprintln!(
            "Burst sizes must be at most {} and divide both {} and {}",
            CAPACITY,
            ITEMS_PER_RUN,
            CAPACITY + 1
        );
        std::process::exit(1);
    }

    let keep_alive = Arc::new(AtomicBool::new(true));
    let keep_alive_for_handler = Arc::clone(&keep_alive);

    // Handle Ctrl+C to stop after the current run
    ctrlc::set_handler(move || {
        keep_alive_for_handler.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");

    let reference: Vec<u32> = (0..ITEMS_PER_RUN as u32).collect();
    let expected = digest(&reference);
    println!("Stress: reference digest {:x}", expected);

    let mut ring: RingBuffer<u32> = RingBuffer::new();
    let start = std::time::Instant::now();
    let mut completed = 0;

    for run in 0..runs {
        if !keep_alive.load(Ordering::SeqCst) {
            println!("Stress: interrupted before run {}", run);
            break;
        }

        ring.resize(CAPACITY)?; // Clears previous state
        let mut received = vec![0u32; ITEMS_PER_RUN];
        let (mut producer, mut consumer) = ring.split();

        thread::scope(|s| {
            s.spawn(|| {
                for chunk in reference.chunks(prod_burst) {
                    loop {
                        thread::yield_now();
                        if let Some(slots) = producer.poke(prod_burst) {
                            slots[..prod_burst].copy_from_slice(chunk);
                            break;
                        }
                    }
                    assert!(producer.write(prod_burst));
                }
            });
            s.spawn(|| {
                for chunk in received.chunks_mut(cons_burst) {
                    loop {
                        thread::yield_now();
                        if let Some(slots) = consumer.peek(cons_burst) {
                            chunk.copy_from_slice(&slots[..cons_burst]);
                            break;
                        }
                    }
                    assert!(consumer.read(cons_burst));
                }
            });
        });

        let actual = digest(&received);
        if actual != expected {
            eprintln!("Stress: run {} digest mismatch: {:x}", run, actual);
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("stream corrupted in run {}", run),
            ));
        }

        completed += 1;
        if completed % 50 == 0 {
            println!("Completed {} runs", completed);
        }
    }

    let elapsed = start.elapsed();
    println!("Stress: {} runs in {:.2?}", completed, elapsed);
    println!(
        "Stress: Throughput: {:.2} items/sec",
        (completed * ITEMS_PER_RUN) as f64 / elapsed.as_secs_f64()
    );

    if !auto_exit {
        println!("Press Ctrl+C to exit...");
        while keep_alive.load(Ordering::SeqCst) {
            std::thread::sleep(std::time::Duration::from_millis(100));
        }
    }
    println!("Stress: Shutting down");

    Ok(())
}

/// A fixed burst size keeps flowing across the wrap point only when it fits
/// the ring and tiles the storage exactly.
fn burst_is_valid(burst: usize) -> bool {
    burst > 0
        && burst <= CAPACITY
        && ITEMS_PER_RUN % burst == 0
        && (CAPACITY + 1) % burst == 0
}

fn digest(items: &[u32]) -> sha2::digest::Output<Sha256> {
    let mut hasher = Sha256::new();
    for item in items {
        hasher.update(item.to_le_bytes());
    }
    hasher.finalize()
}
