//! Lucky Bastion - hero summoning, grid placement and passive-skill core

pub mod core;
pub mod data;
pub mod economy;
pub mod grid;
pub mod presentation;
pub mod skills;
pub mod summon;
pub mod units;
