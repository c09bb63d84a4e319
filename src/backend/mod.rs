//! Typed interfaces to the domain backends.
//!
//! One trait per backend service, one operation per route. Traits take a
//! [`crate::remote::CallContext`] plus a request struct the filter chain
//! pre-populated, and return a response struct or a
//! [`crate::remote::RemoteError`]. Read operations make absence explicit:
//! they return `Ok(None)` for a missing entity, never an error and never a
//! null body.

pub mod content;
pub mod identity;
pub mod plan;
pub mod survey;
pub mod track;

pub use content::{ContentService, HttpContentService};
pub use identity::{HttpIdentityService, IdentityService};
pub use plan::{HttpPlanService, PlanService};
pub use survey::{HttpSurveyService, SurveyService};
pub use track::{HttpTrackService, TrackService};
