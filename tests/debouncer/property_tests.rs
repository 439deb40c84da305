// tests/debouncer/property_tests.rs

#[cfg(test)]
mod tests {
    use crate::fixtures::recorder::Recorder;
    use debouncer::{DebounceConfig, Debouncer, TokioClock};
    use proptest::prelude::*;
    use std::time::Duration;
    use tokio::time::sleep;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn paused_runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        // any burst whose gaps stay under `wait` is delivered once,
        // `wait` after its last call, with the last call's args
        #[test]
        fn burst_under_wait_invokes_once_with_last_args(gaps in prop::collection::vec(1u64..1000, 0..20)) {
            let (calls, last_call_at) = paused_runtime().block_on(async {
                let recorder = Recorder::new();
                let config = DebounceConfig::new(ms(1000));
                let debounced = Debouncer::with_config(recorder.target(), config, TokioClock::new()).unwrap();

                let mut elapsed = 0;
                debounced.invoke("call-0".to_string()).await.unwrap();
                for (i, gap) in gaps.iter().enumerate() {
                    sleep(ms(*gap)).await;
                    elapsed += gap;
                    debounced.invoke(format!("call-{}", i + 1)).await.unwrap();
                }
                sleep(ms(5000)).await;
                (recorder.calls(), elapsed)
            });

            prop_assert_eq!(calls.len(), 1);
            prop_assert_eq!(&calls[0].arg, &format!("call-{}", gaps.len()));
            let expected = ms(last_call_at + 1000);
            prop_assert!(
                calls[0].at + ms(10) >= expected && calls[0].at <= expected + ms(10),
                "delivered at {:?}, expected {:?}",
                calls[0].at,
                expected
            );
        }

        // leading-only bursts are delivered once, immediately, with the first args
        #[test]
        fn leading_burst_invokes_once_with_first_args(gaps in prop::collection::vec(1u64..1000, 0..20)) {
            let calls = paused_runtime().block_on(async {
                let recorder = Recorder::new();
                let config = DebounceConfig::new(ms(1000)).leading(true).trailing(false);
                let debounced = Debouncer::with_config(recorder.target(), config, TokioClock::new()).unwrap();

                debounced.invoke("call-0".to_string()).await.unwrap();
                for (i, gap) in gaps.iter().enumerate() {
                    sleep(ms(*gap)).await;
                    debounced.invoke(format!("call-{}", i + 1)).await.unwrap();
                }
                sleep(ms(5000)).await;
                recorder.calls()
            });

            prop_assert_eq!(calls.len(), 1);
            prop_assert_eq!(calls[0].arg.as_str(), "call-0");
            prop_assert!(calls[0].at <= ms(10));
        }
    }
}
