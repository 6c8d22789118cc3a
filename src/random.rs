use std::time::SystemTime;

use log::info;
use rand::prelude::*;
use rand_pcg::Pcg64Mcg;

pub fn seeded_from_clock() -> Pcg64Mcg {
    let seed = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default();
    info!("Seeded RNG with {}", seed);
    Pcg64Mcg::seed_from_u64(seed)
}

pub trait SpanExt {
    /// Uniform sample from `[low, high)`. A degenerate span yields `low`.
    fn sample_span(&mut self, span: (f32, f32)) -> f32;
}

impl<R: Rng + ?Sized> SpanExt for R {
    fn sample_span(&mut self, (low, high): (f32, f32)) -> f32 {
        if low < high {
            self.gen_range(low..high)
        } else {
            low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_span_stays_in_range() {
        let mut rng = Pcg64Mcg::seed_from_u64(3);
        for _ in 0..1000 {
            let v = rng.sample_span((-2.5, 2.5));
            assert!((-2.5..2.5).contains(&v));
        }
    }

    #[test]
    fn degenerate_span_yields_low() {
        let mut rng = Pcg64Mcg::seed_from_u64(3);
        assert_eq!(rng.sample_span((1., 1.)), 1.);
        assert_eq!(rng.sample_span((2., -2.)), 2.);
    }
}
