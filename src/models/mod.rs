//! # Data Models
//!
//! SeaORM entities for every table touched by an alarm migration. The same
//! entities are used against the source and the destination database.

pub mod alarm_media;
pub mod alarm_type;
pub mod alarm_update;
pub mod camera;
pub mod door;
pub mod employee;
pub mod location_alarm;
pub mod ml_output;
pub mod raw_alarm;
pub mod user;
pub mod video_tag;

pub use alarm_media::Entity as AlarmMedia;
pub use alarm_type::Entity as AlarmType;
pub use alarm_update::Entity as AlarmUpdate;
pub use camera::Entity as Camera;
pub use door::Entity as Door;
pub use employee::Entity as Employee;
pub use location_alarm::Entity as LocationAlarm;
pub use ml_output::Entity as MlOutput;
pub use raw_alarm::Entity as RawAlarm;
pub use user::Entity as User;
pub use video_tag::Entity as VideoTag;
