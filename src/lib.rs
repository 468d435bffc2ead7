//! A task-execution orchestrator for agent-driven software development: a
//! long-lived controller that reads a declarative task catalog, drives each
//! task through a fixed lifecycle by dispatching external agent subprocesses
//! inside isolated git worktrees, integrates completed work back into a
//! main line, and recovers from failures by resuming preserved workspaces on
//! the next run.

pub mod audit;
pub mod config;
pub mod controller;
pub mod merge_flow;
pub mod resume;
pub mod role_select;
pub mod stages;
pub mod telemetry;
pub mod validation_engine;
pub mod worker;
