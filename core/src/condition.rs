use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;

pub use k8s_openapi::apimachinery::pkg::apis::meta::v1::Condition;

/// Produces the timestamp stamped onto a condition's `lastTransitionTime`.
///
/// Production code uses [`SystemClock`]; tests pin a [`FixedClock`] so
/// structural equality checks on condition arrays don't depend on wall time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Time;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Time {
        Time(chrono::Utc::now())
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub chrono::DateTime<chrono::Utc>);

impl Clock for FixedClock {
    fn now(&self) -> Time {
        Time(self.0)
    }
}

/// Builds a condition, stamping `lastTransitionTime` from `clock`.
///
/// `observed_generation` should be the reconciled object's
/// `metadata.generation`, matching the upstream Gateway-API status contract.
pub fn make_condition(
    clock: &dyn Clock,
    type_: &str,
    status: bool,
    reason: &str,
    message: impl Into<String>,
    observed_generation: Option<i64>,
) -> Condition {
    Condition {
        last_transition_time: clock.now(),
        message: message.into(),
        observed_generation,
        reason: reason.to_string(),
        status: if status { "True" } else { "False" }.to_string(),
        type_: type_.to_string(),
    }
}

/// Compares two conditions ignoring `lastTransitionTime`: status writes are
/// emitted only when the computed status differs from the observed status
/// once that field is disregarded.
pub fn conditions_equal_ignoring_time(a: &Condition, b: &Condition) -> bool {
    a.type_ == b.type_
        && a.status == b.status
        && a.reason == b.reason
        && a.message == b.message
        && a.observed_generation == b.observed_generation
}

/// Compares two condition slices, order-sensitively, ignoring
/// `lastTransitionTime` on each element.
pub fn condition_lists_equal_ignoring_time(a: &[Condition], b: &[Condition]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b.iter())
            .all(|(x, y)| conditions_equal_ignoring_time(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cond(reason: &str, time_secs: i64) -> Condition {
        Condition {
            last_transition_time: Time(
                chrono::DateTime::from_timestamp(time_secs, 0).unwrap(),
            ),
            message: String::new(),
            observed_generation: None,
            reason: reason.to_string(),
            status: "True".to_string(),
            type_: "Accepted".to_string(),
        }
    }

    #[test]
    fn ignores_last_transition_time() {
        let a = cond("Accepted", 0);
        let b = cond("Accepted", 100);
        assert!(conditions_equal_ignoring_time(&a, &b));
    }

    #[test]
    fn detects_reason_change() {
        let a = cond("Accepted", 0);
        let b = cond("NoMatchingParent", 0);
        assert!(!conditions_equal_ignoring_time(&a, &b));
    }
}
