// tests/debouncer/concurrency_tests.rs

#[cfg(test)]
mod tests {
    use crate::fixtures::recorder::Recorder;
    use debouncer::{DebounceConfig, Debouncer, TokioClock};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_callers_collapse_into_one_invocation() {
        let recorder = Recorder::new();
        let config = DebounceConfig::new(Duration::from_millis(200));
        let debounced =
            Arc::new(Debouncer::with_config(recorder.target(), config, TokioClock::new()).unwrap());

        let handles: Vec<_> = (0..50)
            .map(|i| {
                let debounced = Arc::clone(&debounced);
                tokio::spawn(async move { debounced.invoke(format!("caller-{i}")).await })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), None);
        }

        tokio::time::sleep(Duration::from_millis(1000)).await;

        assert_eq!(recorder.count(), 1);
        assert!(recorder.args()[0].starts_with("caller-"));
        assert!(!debounced.is_pending());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_leading_callers_invoke_once() {
        let recorder = Recorder::new();
        let config = DebounceConfig::new(Duration::from_millis(200))
            .leading(true)
            .trailing(false);
        let debounced =
            Arc::new(Debouncer::with_config(recorder.target(), config, TokioClock::new()).unwrap());

        let handles: Vec<_> = (0..50)
            .map(|i| {
                let debounced = Arc::clone(&debounced);
                tokio::spawn(async move { debounced.invoke(format!("caller-{i}")).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(recorder.count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn independent_instances_do_not_block_each_other() {
        let slow = Recorder::new();
        let fast = Recorder::new();
        let leading = DebounceConfig::new(Duration::from_millis(100)).leading(true);
        let slow_debounced = Arc::new(
            Debouncer::with_config(
                slow.slow_target(Duration::from_secs(60)),
                leading.clone(),
                TokioClock::new(),
            )
            .unwrap(),
        );
        let fast_debounced = Debouncer::with_config(fast.target(), leading, TokioClock::new()).unwrap();

        let stuck = {
            let slow_debounced = Arc::clone(&slow_debounced);
            tokio::spawn(async move { slow_debounced.invoke("slow".to_string()).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(
            fast_debounced.invoke("fast".to_string()).await.unwrap(),
            Some("fast".to_string())
        );
        assert_eq!(slow.count(), 1);
        assert!(!stuck.is_finished());
        stuck.abort();
    }
}
