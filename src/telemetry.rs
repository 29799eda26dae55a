//! Optional counters exported through the `metrics` facade.
//!
//! Every function compiles to nothing unless the `metrics` feature is
//! enabled, so the hot paths carry no cost by default.

#[cfg(feature = "metrics")]
use crate::queue::order::Side;
#[cfg(feature = "metrics")]
use crate::tracker::kind::MessageKind;

#[cfg(feature = "metrics")]
mod names {
    pub const QUEUE_PUSH: &str = "orderqueue_push_total";
    pub const QUEUE_POP: &str = "orderqueue_pop_total";
    pub const QUEUE_REMOVE: &str = "orderqueue_remove_total";
    pub const QUEUE_REMOVE_MISS: &str = "orderqueue_remove_not_found_total";
    pub const TRACKER_ADMITTED: &str = "orderqueue_messages_admitted_total";
    pub const TRACKER_DUPLICATE: &str = "orderqueue_messages_duplicate_total";
}

macro_rules! side_counter {
    ($fn_name:ident, $metric:ident) => {
        #[inline]
        #[allow(unused_variables)]
        pub(crate) fn $fn_name(side: crate::queue::order::Side) {
            #[cfg(feature = "metrics")]
            metrics::counter!(names::$metric, "side" => Side::as_str(side)).increment(1);
        }
    };
}

side_counter!(record_push, QUEUE_PUSH);
side_counter!(record_pop, QUEUE_POP);
side_counter!(record_remove, QUEUE_REMOVE);
side_counter!(record_remove_miss, QUEUE_REMOVE_MISS);

#[inline]
#[allow(unused_variables)]
pub(crate) fn record_admission(kind: crate::tracker::kind::MessageKind, admitted: bool) {
    #[cfg(feature = "metrics")]
    {
        let name = if admitted {
            names::TRACKER_ADMITTED
        } else {
            names::TRACKER_DUPLICATE
        };
        metrics::counter!(name, "kind" => MessageKind::as_str(kind)).increment(1);
    }
}
