/*!
 * Scheduler Types
 * Algorithm selection and the teaching catalogue attached to each algorithm
 */

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Scheduling algorithm
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    /// First come, first served
    #[default]
    Fcfs,
    /// Shortest job first (non-preemptive, total burst)
    Sjf,
    /// Shortest remaining time first
    Srtf,
    /// Preemptive priority, lower number wins
    Priority,
    /// Round robin with a fixed quantum
    RoundRobin,
    /// Earliest deadline first
    Edf,
    /// Multilevel queue keyed by process type
    Mlq,
    /// Multilevel feedback queue with demotion
    Mlfq,
}

impl Algorithm {
    pub const ALL: [Algorithm; 8] = [
        Algorithm::Fcfs,
        Algorithm::Sjf,
        Algorithm::Srtf,
        Algorithm::Priority,
        Algorithm::RoundRobin,
        Algorithm::Edf,
        Algorithm::Mlq,
        Algorithm::Mlfq,
    ];

    /// Convert to string representation
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::Sjf => "sjf",
            Self::Srtf => "srtf",
            Self::Priority => "priority",
            Self::RoundRobin => "round_robin",
            Self::Edf => "edf",
            Self::Mlq => "mlq",
            Self::Mlfq => "mlfq",
        }
    }

    /// Short label used in timelines and logs
    pub const fn short_name(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::Sjf => "SJF",
            Self::Srtf => "SRTF",
            Self::Priority => "Priority",
            Self::RoundRobin => "RR",
            Self::Edf => "EDF",
            Self::Mlq => "MLQ",
            Self::Mlfq => "MLFQ",
        }
    }

    /// Teaching notes for this algorithm
    pub fn info(&self) -> AlgorithmInfo {
        match self {
            Self::Fcfs => AlgorithmInfo {
                name: "First Come First Serve (FCFS)",
                description: "Processes are executed in the order they arrive in the ready queue.",
                concept: "Non-preemptive scheduling based on arrival time. Uses a FIFO queue.",
                pros: &["Simple to implement", "No starvation", "Fair in order of arrival"],
                cons: &["Convoy effect", "High average waiting time", "Poor for time-sharing"],
                pseudocode: FCFS_PSEUDOCODE,
            },
            Self::Sjf => AlgorithmInfo {
                name: "Shortest Job First (SJF)",
                description: "The ready process with the smallest burst time runs next.",
                concept: "Non-preemptive; minimizes average waiting time for batch workloads.",
                pros: &["Minimum average waiting time", "Good for batch systems"],
                cons: &["Starvation of long jobs", "Needs burst time up front"],
                pseudocode: SJF_PSEUDOCODE,
            },
            Self::Srtf => AlgorithmInfo {
                name: "Shortest Remaining Time First (SRTF)",
                description: "The ready process with the least remaining CPU time runs next.",
                concept: "Preemptive SJF: a shorter arrival takes the CPU immediately.",
                pros: &["Optimal average waiting time", "Short jobs finish fast"],
                cons: &["Starvation of long jobs", "Frequent preemption"],
                pseudocode: SRTF_PSEUDOCODE,
            },
            Self::Priority => AlgorithmInfo {
                name: "Priority Scheduling",
                description: "Each process carries a priority; the most important ready process runs.",
                concept: "Preemptive. Lower number means higher priority in this simulation.",
                pros: &["Important tasks run first", "Flexible prioritization"],
                cons: &["Starvation possible", "Priority inversion"],
                pseudocode: PRIORITY_PSEUDOCODE,
            },
            Self::RoundRobin => AlgorithmInfo {
                name: "Round Robin (RR)",
                description: "Each process gets a fixed time quantum in turn.",
                concept: "Preemptive time-sharing over a circular ready queue.",
                pros: &["Fair CPU allocation", "Good response time", "No starvation"],
                cons: &["Context switch overhead", "Sensitive to quantum size"],
                pseudocode: ROUND_ROBIN_PSEUDOCODE,
            },
            Self::Edf => AlgorithmInfo {
                name: "Earliest Deadline First (EDF)",
                description: "The ready process with the nearest absolute deadline runs next.",
                concept: "Dynamic-priority real-time scheduling; processes without a deadline run last.",
                pros: &["Optimal for feasible uniprocessor task sets", "Adapts to deadlines"],
                cons: &["Domino effect under overload", "Needs deadlines up front"],
                pseudocode: EDF_PSEUDOCODE,
            },
            Self::Mlq => AlgorithmInfo {
                name: "Multilevel Queue (MLQ)",
                description: "Processes are partitioned by type into fixed queues served in order.",
                concept: "System, interactive, user and batch queues; a higher queue preempts a lower one.",
                pros: &["Separates workload classes", "Low overhead"],
                cons: &["Lower queues can starve", "Inflexible classification"],
                pseudocode: MLQ_PSEUDOCODE,
            },
            Self::Mlfq => AlgorithmInfo {
                name: "Multilevel Feedback Queue (MLFQ)",
                description: "Processes move down levels as they use up their quantum.",
                concept: "Level quanta 4, 8, then FCFS. I/O yields keep the current level.",
                pros: &["Favors interactive jobs", "No burst estimate needed"],
                cons: &["Complex to tune", "CPU-bound jobs sink to the bottom"],
                pseudocode: MLFQ_PSEUDOCODE,
            },
        }
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fcfs" | "fifo" => Ok(Self::Fcfs),
            "sjf" => Ok(Self::Sjf),
            "srtf" | "srt" => Ok(Self::Srtf),
            "priority" | "prio" => Ok(Self::Priority),
            "round_robin" | "round-robin" | "roundrobin" | "rr" => Ok(Self::RoundRobin),
            "edf" => Ok(Self::Edf),
            "mlq" => Ok(Self::Mlq),
            "mlfq" => Ok(Self::Mlfq),
            _ => Err(format!(
                "Invalid algorithm '{}'. Valid: fcfs, sjf, srtf, priority, round_robin, edf, mlq, mlfq",
                s
            )),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl Serialize for Algorithm {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Algorithm {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Teaching catalogue entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub concept: &'static str,
    pub pros: &'static [&'static str],
    pub cons: &'static [&'static str],
    pub pseudocode: &'static str,
}

const FCFS_PSEUDOCODE: &str = r"each tick:
    if cpu is free:
        next = ready process with the earliest arrival
        dispatch(next)
    run the dispatched process until it terminates or blocks on I/O";

const SJF_PSEUDOCODE: &str = r"each tick:
    if cpu is free:
        next = ready process with the smallest burst_time
        ties: earliest arrival, then lowest pid
        dispatch(next)
    never preempt the running process";

const SRTF_PSEUDOCODE: &str = r"each tick:
    best = ready process with the smallest remaining_time
    if running and best.remaining_time < running.remaining_time:
        preempt(running)
    if cpu is free:
        dispatch(best)";

const PRIORITY_PSEUDOCODE: &str = r"each tick:
    best = ready process with the lowest priority number
    if running and best.priority < running.priority:
        preempt(running)
    if cpu is free:
        dispatch(best)";

const ROUND_ROBIN_PSEUDOCODE: &str = r"each tick:
    if running has used its quantum:
        move running to the back of the queue
    if cpu is free:
        dispatch(queue.pop_front())
    run for one tick";

const EDF_PSEUDOCODE: &str = r"each tick:
    best = ready process with the earliest deadline
    processes without a deadline sort last
    if running and best.deadline < running.deadline:
        preempt(running)
    if cpu is free:
        dispatch(best)";

const MLQ_PSEUDOCODE: &str = r"queues: system, interactive, user, batch
each tick:
    best = first arrival in the highest non-empty queue
    if running sits in a lower queue than best:
        preempt(running)
    if cpu is free:
        dispatch(best)";

const MLFQ_PSEUDOCODE: &str = r"levels: 0 (quantum 4), 1 (quantum 8), 2 (run to completion)
new processes start at level 0
each tick:
    if running used up its level quantum:
        demote one level and requeue
    best = ready process on the highest level
    if running sits on a lower level than best:
        preempt(running)
    if cpu is free:
        dispatch(best)
    blocking on I/O keeps the current level";
