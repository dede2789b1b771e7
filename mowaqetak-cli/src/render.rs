//! Terminal rendering of the result card.

use mowaqetak_core::{AppointmentPlan, Script, format_date_time_in, format_time_in};

pub const EMPTY_STATE: &str = "No appointment yet. Create one with: mowaqetak plan --from LAT,LNG --to LAT,LNG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    pub leave_time: String,
    pub destination: String,
    pub arrival: String,
    pub distance: String,
    pub travel: String,
}

impl ResultCard {
    pub fn from_plan(plan: &AppointmentPlan, script: Script) -> Self {
        let destination = if plan.destination_label.trim().is_empty() {
            format!("({:.4}, {:.4})", plan.destination.lat, plan.destination.lng)
        } else {
            plan.destination_label.clone()
        };

        let km = plan.origin.distance_to(&plan.destination);
        let distance = match script {
            Script::Latin => format!("{km:.1} km"),
            Script::Arabic => format!("{km:.1} كم"),
        };

        let travel = match script {
            Script::Latin => format!("{} min", plan.travel_minutes),
            Script::Arabic => format!("{} دقيقة", plan.travel_minutes),
        };

        Self {
            leave_time: format_time_in(plan.leave_at, script),
            destination,
            arrival: format_date_time_in(plan.arrive_at, script),
            distance,
            travel,
        }
    }

    pub fn to_text(&self) -> String {
        format!(
            "Leave at:    {}\nDestination: {}\nArrival:     {}\nDistance:    {}\nTravel:      {}\n",
            self.leave_time, self.destination, self.arrival, self.distance, self.travel
        )
    }
}

pub fn render(plan: Option<&AppointmentPlan>, script: Script) -> String {
    match plan {
        Some(p) => ResultCard::from_plan(p, script).to_text(),
        None => format!("{EMPTY_STATE}\n"),
    }
}
