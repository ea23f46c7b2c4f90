pub mod admin_auth;
pub mod admin_gear;
pub mod admin_leads;
pub mod admin_vehicles;
pub mod catalog;
pub mod contact;
pub mod content;
pub mod dashboard;
pub mod orders;
pub mod uploads;
