use log::trace;
use rayon::prelude::{IndexedParallelIterator, ParallelIterator, ParallelSliceMut};

use crate::{
    error::Result,
    pixel::{Pixel, PixelBuffer},
    screen,
};

/**
Runs a per-pixel kernel over a whole frame.

The kernel is called once for every `(x, y)` in `[0, width) × [0, height)`. Calls
have no ordering between them, so each one must only read shared state and
produce the value of its own pixel.

Handing out one task per pixel makes scheduling overhead dominate for cheap
kernels: a 640x640 frame is 409600 tasks, and most escape-time samples outside
the set finish in a handful of iterations. Rayon splits work adaptively, so
instead I hand it one task per row. Each task gets a `&mut` to exactly one row
of the output (`par_chunks_mut(width)`), which makes the disjoint-writes
property a borrow-checker fact rather than a convention.

[`Dispatcher::render`] only returns once every row is written: `install` blocks
the caller until the parallel iterator completes. There is no partial frame.
A newer request simply renders into a fresh buffer; nothing is cancelled.
*/
pub struct Dispatcher {
    pool: rayon::ThreadPool,
}

impl Dispatcher {
    pub fn new(threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("pixel-worker-{}", index))
            .build()?;
        Ok(Self { pool })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn render<K>(&self, size: screen::Size, kernel: K) -> PixelBuffer
    where
        K: Fn(u32, u32) -> Pixel + Sync,
    {
        trace!("begin dispatch {}x{}", size.width, size.height);

        let mut buffer = PixelBuffer::new(size);
        if !size.is_empty() {
            let width = size.width as usize;
            self.pool.install(|| {
                buffer
                    .pixels_mut()
                    .par_chunks_mut(width)
                    .enumerate()
                    .for_each(|(y, row)| {
                        for (x, pixel) in row.iter_mut().enumerate() {
                            *pixel = kernel(x as u32, y as u32);
                        }
                    });
            });
        }

        trace!("end dispatch");
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn every_pixel_is_visited_once() {
        let dispatcher = Dispatcher::new(4).unwrap();
        let calls = AtomicUsize::new(0);
        let size = screen::Size::new(37, 11);

        let buffer = dispatcher.render(size, |x, y| {
            calls.fetch_add(1, Ordering::Relaxed);
            Pixel(y * 1000 + x)
        });

        assert_eq!(calls.load(Ordering::Relaxed), size.pixel_count());
        for y in 0..size.height {
            for x in 0..size.width {
                assert_eq!(buffer.get(x, y), Some(Pixel(y * 1000 + x)));
            }
        }
    }

    #[test]
    fn result_does_not_depend_on_thread_count() {
        let kernel = |x: u32, y: u32| Pixel(x.wrapping_mul(2_654_435_761) ^ y);
        let size = screen::Size::new(64, 48);
        let one = Dispatcher::new(1).unwrap().render(size, kernel);
        let many = Dispatcher::new(8).unwrap().render(size, kernel);
        assert_eq!(one, many);
    }

    #[test]
    fn empty_frame_calls_nothing() {
        let dispatcher = Dispatcher::new(2).unwrap();
        let buffer = dispatcher.render(screen::Size::new(0, 5), |_, _| panic!("called"));
        assert!(buffer.pixels().is_empty());
    }
}
