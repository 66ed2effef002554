// SYNOID B-Roll Library
// Copyright (c) 2026 Xing_The_Creator | SYNOID

pub mod broll_engine;
pub mod config;
