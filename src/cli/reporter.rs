// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::classify::{Classification, PointClass};
use crate::mesh::StitchReport;
use colored::*;
use nalgebra::Point3;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report a stitching run with colors
    pub fn report_stitch(file: &str, report: &StitchReport, duration: Duration) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "File:".bold(), file.cyan());
        println!("{}", "━".repeat(80).bright_black());

        let stats = &report.stats;
        if stats.open_half_edges == 0 {
            println!("{} {}", "✅".green(), "All half-edges paired".green().bold());
        } else {
            println!(
                "{} {}",
                "⚠️".yellow(),
                format!("{} half-edges left open", stats.open_half_edges).yellow().bold()
            );
        }

        println!("\n{}", "Input:".bold());
        Self::print_count("Vertices", report.vertices);
        Self::print_count("Faces", report.faces);
        Self::print_count("Half-edges", stats.half_edges);

        println!("\n{}", "Pairs:".bold());
        Self::print_count("Simple", stats.simple_pairs);
        Self::print_count("Open regions", stats.open_region_pairs);
        Self::print_count("Angular", stats.angular_pairs);
        if stats.complex_edges > 0 {
            println!(
                "  {} {} in {} paths, {} runs",
                "Complex edges:".bright_black(),
                stats.complex_edges.to_string().cyan(),
                stats.paths,
                stats.bundle_runs
            );
        }

        println!("\n{}", "Meshes:".bold());
        for mesh in &report.meshes {
            let state = if !mesh.closed {
                format!("open ({} edges)", mesh.open_edges).yellow()
            } else if mesh.negative {
                "closed, negative".magenta()
            } else {
                "closed".green()
            };
            println!(
                "  {} {:>6} faces  {}  volume {:.6}",
                format!("mesh_{}", mesh.id).cyan(),
                mesh.faces,
                state,
                mesh.volume
            );
        }

        println!(
            "\n  {} {}",
            "Time:".bright_black(),
            Self::format_duration(duration).yellow()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report one classified point
    pub fn report_classification(point: &Point3<f64>, result: &crate::Result<Classification>) {
        let location = format!("({}, {}, {})", point.x, point.y, point.z);
        match result {
            Ok(c) => {
                let class = match c.class {
                    PointClass::In => "IN".green().bold(),
                    PointClass::Out => "OUT".blue().bold(),
                    PointClass::On => "ON".yellow().bold(),
                };
                let detail = match c.hit_face {
                    Some(face) => format!("face {}", face.0),
                    None => format!("{} rays", c.attempts),
                };
                println!("  {:<40} {:<4} {}", location, class, detail.bright_black());
            }
            Err(e) => println!("  {:<40} {}", location, e.to_string().red()),
        }
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("\n{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    fn print_count(name: &str, value: usize) {
        println!(
            "  {} {}",
            format!("{}:", name).bright_black(),
            value.to_string().cyan()
        );
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }

    /// Print success message
    pub fn success(message: &str) {
        println!("{} {}", "✅".green(), message.green());
    }
}
