// ============================================================================
// READINESS - wait for a script we do not control (the maps SDK)
// ============================================================================

use std::future::Future;

use crate::config::ReadinessConfig;
use crate::error::ReadinessError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ready {
    pub attempts: u32,
    pub waited_ms: u32,
}

/// Check `is_ready` now and then every `poll_interval_ms` until it passes or
/// `timeout_ms` has elapsed. The timeout comes back as an error instead of
/// being dropped on the floor.
pub async fn wait_until_ready<P, S, F>(
    mut is_ready: P,
    policy: ReadinessConfig,
    mut sleep: S,
) -> Result<Ready, ReadinessError>
where
    P: FnMut() -> bool,
    S: FnMut(u32) -> F,
    F: Future<Output = ()>,
{
    let interval = policy.poll_interval_ms.max(1);
    let mut waited_ms = 0;
    let mut attempts = 0;

    loop {
        attempts += 1;
        if is_ready() {
            log::debug!("✅ [READY] ready after {} ms ({} checks)", waited_ms, attempts);
            return Ok(Ready { attempts, waited_ms });
        }
        if waited_ms >= policy.timeout_ms {
            log::warn!("⏰ [READY] gave up after {} ms", waited_ms);
            return Err(ReadinessError::TimedOut { waited_ms, attempts });
        }
        let step = interval.min(policy.timeout_ms - waited_ms);
        sleep(step).await;
        waited_ms += step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::future::ready;
    use std::cell::RefCell;

    fn policy() -> ReadinessConfig {
        ReadinessConfig {
            poll_interval_ms: 200,
            timeout_ms: 6000,
        }
    }

    #[test]
    fn already_loaded_needs_no_sleep() {
        let sleeps = RefCell::new(Vec::new());
        let result = block_on(wait_until_ready(|| true, policy(), |ms| {
            sleeps.borrow_mut().push(ms);
            ready(())
        }));
        assert_eq!(result, Ok(Ready { attempts: 1, waited_ms: 0 }));
        assert!(sleeps.borrow().is_empty());
    }

    #[test]
    fn becomes_ready_on_third_check() {
        let mut checks = 0;
        let result = block_on(wait_until_ready(
            || {
                checks += 1;
                checks == 3
            },
            policy(),
            |_| ready(()),
        ));
        assert_eq!(result, Ok(Ready { attempts: 3, waited_ms: 400 }));
    }

    #[test]
    fn times_out_at_the_ceiling() {
        let sleeps = RefCell::new(Vec::new());
        let result = block_on(wait_until_ready(|| false, policy(), |ms| {
            sleeps.borrow_mut().push(ms);
            ready(())
        }));
        assert_eq!(result, Err(ReadinessError::TimedOut { waited_ms: 6000, attempts: 31 }));
        assert_eq!(sleeps.borrow().len(), 30);
        assert!(sleeps.borrow().iter().all(|ms| *ms == 200));
    }

    #[test]
    fn last_sleep_is_clipped_to_the_ceiling() {
        let sleeps = RefCell::new(Vec::new());
        let uneven = ReadinessConfig {
            poll_interval_ms: 400,
            timeout_ms: 1000,
        };
        let result = block_on(wait_until_ready(|| false, uneven, |ms| {
            sleeps.borrow_mut().push(ms);
            ready(())
        }));
        assert_eq!(*sleeps.borrow(), vec![400, 400, 200]);
        assert!(matches!(result, Err(ReadinessError::TimedOut { waited_ms: 1000, .. })));
    }
}
