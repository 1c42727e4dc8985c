// jobmark services
// Stateless or externally-facing services: the remote job feed, settings, and log output.

pub mod job_feed;
pub mod logging;
pub mod settings_engine;
