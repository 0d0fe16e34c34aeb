//! # Vehicle controller library.
//!
//! This library holds the controllers run by the vehicle executables, so that they can be tested
//! and benchmarked without a simulator.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Follower - tracks a leading vehicle with the camera and keeps a following distance
pub mod follower;

/// Forward collision avoidance - stops the vehicle in front of an obstacle
pub mod fca;

/// Remote control - drives the vehicle from the keyboard
pub mod remote_ctrl;

/// Scripted simulation host - replays a scenario script in place of the simulator
pub mod sim_host;

/// Summary of an executable's run
pub mod summary;
