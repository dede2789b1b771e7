//! mowaqetak-core: leave-by time computation for Riyadh appointments

pub mod geo;
pub mod input;
pub mod picker;
pub mod planner;
pub mod store;
pub mod time;
pub mod travel;

pub use geo::{GeoPoint, distance_km, EARTH_RADIUS_KM};
pub use input::{Defaults, FormInput, InputError, PlanRequest, clamp_non_neg_int, point_from_inputs};
pub use picker::{MapBounds, KSA_BOUNDS};
pub use planner::{AppointmentPlan, plan_appointment};
pub use store::{KeyValueStore, MemoryStore, PlanSlot, PLAN_KEY, from_persistable, to_persistable};
pub use time::{
    LocalParts, Script, current_local_parts, format_date_time, format_date_time_in, format_time,
    format_time_in, local_parts_at, resolve_local_date_time, UTC_OFFSET_HOURS,
};
pub use travel::{estimate_travel_minutes, travel_minutes_for_km};
