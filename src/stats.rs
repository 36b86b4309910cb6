//! Simulation statistics collection and reporting.
//!
//! Tracks cycle and instruction counts alongside the two hazard responses
//! the pipeline can take: a load-use stall or a control-flow flush.

use std::time::Instant;

/// Simulation statistics structure tracking all performance metrics.
pub struct SimStats {
    start_time: Instant,
    pub cycles: u64,
    pub instructions_retired: u64,
    pub stalls: u64,
    pub flushes: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            stalls: 0,
            flushes: 0,
        }
    }
}

impl SimStats {
    /// Prints a formatted summary of all simulation statistics.
    pub fn print(&self) {
        let duration = self.start_time.elapsed();
        let seconds = duration.as_secs_f64();

        let cyc = if self.cycles == 0 { 1 } else { self.cycles };
        let ipc = self.instructions_retired as f64 / cyc as f64;
        let cpi = cyc as f64 / self.instructions_retired.max(1) as f64;
        let khz = (self.cycles as f64 / seconds) / 1000.0;

        println!("\n==========================================================");
        println!("MIPS5 PIPELINE SIMULATION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {:.4} s", seconds);
        println!("sim_cycles               {}", self.cycles);
        println!("sim_freq                 {:.2} kHz", khz);
        println!("sim_insts                {}", self.instructions_retired);
        println!("sim_ipc                  {:.4}", ipc);
        println!("sim_cpi                  {:.4}", cpi);
        println!("----------------------------------------------------------");
        println!(
            "  stalls.load_use        {} ({:.2}%)",
            self.stalls,
            (self.stalls as f64 / cyc as f64) * 100.0
        );
        println!(
            "  flushes.control        {} ({:.2}%)",
            self.flushes,
            (self.flushes as f64 / cyc as f64) * 100.0
        );
        println!("==========================================================");
    }
}
