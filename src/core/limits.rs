/*!
 * Simulator Limits and Constants
 *
 * Centralized location for scheduling constants and configuration bounds.
 * Organized by domain so the textbook values stay discoverable.
 */

use super::types::{Priority, Tick};

// =============================================================================
// SCHEDULING
// =============================================================================

/// Default Round-Robin time quantum (ticks)
pub const DEFAULT_TIME_QUANTUM: Tick = 2;

/// Smallest accepted time quantum
pub const MIN_TIME_QUANTUM: Tick = 1;

/// Default context-switch overhead (ticks, 0 disables it)
pub const DEFAULT_CONTEXT_SWITCH: Tick = 0;

/// Per-level MLFQ quanta, `None` is the unbounded FCFS rung
pub const MLFQ_LEVEL_QUANTA: [Option<Tick>; 3] = [Some(4), Some(8), None];

/// Bottom MLFQ rung; demotion is capped here
pub const MLFQ_BOTTOM_LEVEL: u8 = 2;

/// Number of MLQ queues (system, interactive, user, batch)
pub const MLQ_QUEUE_COUNT: u8 = 4;

// =============================================================================
// PROCESS PARAMETERS
// =============================================================================

/// Smallest accepted burst time
pub const MIN_BURST_TIME: Tick = 1;

/// Smallest accepted priority (most important)
pub const MIN_PRIORITY: Priority = 1;

/// Smallest accepted I/O duration
pub const MIN_IO_DURATION: Tick = 1;

// =============================================================================
// DRIVER
// =============================================================================

/// Default driver cadence
pub const DEFAULT_TICKS_PER_SECOND: u32 = 1;

/// Upper bound on driver cadence
pub const MAX_TICKS_PER_SECOND: u32 = 1000;
