// lib.rs - ReconPipe - Bug Bounty Recon Pipeline
// Purpose: Sequential recon automation: subfinder -> assetfinder -> amass -> httpx -> nuclei
// License: MIT

pub mod report;
pub mod runner;
pub mod scan;
pub mod textops;
pub mod tools;
