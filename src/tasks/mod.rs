//! Background Tasks Module
//!
//! # Tasks
//! - TTL Sweep: Removes expired fast-layer entries at configured intervals

mod sweeper;

pub use sweeper::spawn_sweep_task;
