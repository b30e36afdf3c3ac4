//! # Repository Layer
//!
//! Repositories encapsulate the SeaORM queries issued against the source and
//! destination databases. Each one is generic over [`sea_orm::ConnectionTrait`]
//! so the same code runs on a plain connection or inside a transaction.

pub mod alarm_media;
pub mod alarm_type;
pub mod alarm_update;
pub mod door;
pub mod employee;
pub mod ml_output;
pub mod raw_alarm;
pub mod site;
pub mod user;

pub use alarm_media::AlarmMediaRepository;
pub use alarm_type::AlarmTypeRepository;
pub use alarm_update::AlarmUpdateRepository;
pub use door::DoorRepository;
pub use employee::EmployeeRepository;
pub use ml_output::MlOutputRepository;
pub use raw_alarm::RawAlarmRepository;
pub use site::SiteRepository;
pub use user::UserRepository;
