// FlexSonic — Signal Smoothing
//
// One smoothed reading = mean of N raw ADC samples taken a few milliseconds
// apart. The deliberate inter-sample delay decorrelates supply noise; the
// blocking cost (N × delay per channel) is accepted — finger gestures are
// slow compared to the sampling window.

use std::thread;
use std::time::Duration;

use crate::engine::FlexSensors;

/// Average `samples` raw reads of one channel, truncating toward zero.
///
/// Fail-soft: a failed read contributes 0 to the sum and the loop keeps
/// going, so a flaky sensor drags its average down instead of stalling the
/// cycle.
pub fn smooth<S: FlexSensors>(
    sensors: &mut S,
    channel: usize,
    samples: u32,
    delay: Duration,
) -> i32 {
    let mut sum: i64 = 0;
    for _ in 0..samples {
        let value = match sensors.read_channel(channel) {
            Ok(v) => v,
            Err(e) => {
                log::debug!("channel {} read failed, counting 0: {}", channel, e);
                0
            }
        };
        sum += i64::from(value);
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
    (sum / i64::from(samples)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;

    /// Replays a per-channel script of results; `None` simulates a failed read.
    struct Scripted {
        script: Vec<Option<i32>>,
        cursor: usize,
    }

    impl Scripted {
        fn new(script: Vec<Option<i32>>) -> Self {
            Self { script, cursor: 0 }
        }
    }

    impl FlexSensors for Scripted {
        fn read_channel(&mut self, _channel: usize) -> anyhow::Result<i32> {
            let slot = self.script[self.cursor % self.script.len()];
            self.cursor += 1;
            match slot {
                Some(v) => Ok(v),
                None => bail!("adc timeout"),
            }
        }
    }

    #[test]
    fn averages_all_samples() {
        let mut sensors = Scripted::new(vec![Some(2100), Some(2300)]);
        // 10 samples alternating 2100/2300 → mean 2200.
        assert_eq!(smooth(&mut sensors, 0, 10, Duration::ZERO), 2200);
    }

    #[test]
    fn mean_truncates_toward_zero() {
        let mut sensors = Scripted::new(vec![Some(1), Some(2)]);
        // Sum 3 over 2 samples → 1, not 2.
        assert_eq!(smooth(&mut sensors, 0, 2, Duration::ZERO), 1);
    }

    #[test]
    fn failed_reads_count_as_zero() {
        let mut sensors = Scripted::new(vec![Some(2000), None]);
        // 4 samples: 2000, 0, 2000, 0 → mean 1000.
        assert_eq!(smooth(&mut sensors, 0, 4, Duration::ZERO), 1000);
    }

    #[test]
    fn all_reads_failing_degrades_to_zero() {
        let mut sensors = Scripted::new(vec![None]);
        assert_eq!(smooth(&mut sensors, 0, 20, Duration::ZERO), 0);
    }
}
