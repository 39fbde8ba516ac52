//! Command-line interface for running a job list of collapse models

use crate::algorithm::executor::{CollapseDriver, Model};
use crate::algorithm::overlapping::OverlappingModel;
use crate::algorithm::tiled::TiledModel;
use crate::io::configuration::{DEFAULT_ATTEMPTS, DEFAULT_OUTPUT_DIR};
use crate::io::error::Result;
use crate::io::image::save_png;
use crate::io::jobs::{Job, JobKind, load_jobs};
use crate::io::progress::ProgressManager;
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "wavetile")]
#[command(
    author,
    version,
    about = "Synthesize images from samples and tilesets with wave function collapse"
)]
/// Command-line arguments for the job runner
pub struct Cli {
    /// XML job list
    #[arg(value_name = "JOBS")]
    pub jobs: PathBuf,

    /// Directory holding sample images and tileset directories
    #[arg(short, long, default_value = "samples")]
    pub textures: PathBuf,

    /// Directory receiving the generated images
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Master seed; a random one is drawn when omitted
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Attempts per screenshot before giving up
    #[arg(short, long, default_value_t = DEFAULT_ATTEMPTS)]
    pub attempts: usize,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Totals over a whole job list
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Images written
    pub rendered: usize,
    /// Screenshots abandoned after every attempt contradicted
    pub failed: usize,
    /// Jobs skipped because they were unsupported or could not be built
    pub skipped: usize,
}

/// Runs every job of a job list and saves the results
pub struct JobRunner {
    cli: Cli,
    master_seed: u64,
    progress_manager: Option<ProgressManager>,
}

impl JobRunner {
    /// Create a runner for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);
        let master_seed = cli.seed.unwrap_or_else(rand::random);

        Self {
            cli,
            master_seed,
            progress_manager,
        }
    }

    /// Seed of the generator that draws every attempt seed
    pub const fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Load the job list and run it
    ///
    /// # Errors
    ///
    /// Returns an error if the job list cannot be loaded or an image cannot be saved
    pub fn process(&mut self) -> Result<RunSummary> {
        let jobs = load_jobs(&self.cli.jobs)?;
        self.run_jobs(&jobs)
    }

    /// Run already parsed jobs
    ///
    /// # Errors
    ///
    /// Returns an error if a rendered image cannot be saved
    pub fn run_jobs(&mut self, jobs: &[Job]) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        let mut rng = StdRng::seed_from_u64(self.master_seed);
        self.report(&format!("SEED: {:x}", self.master_seed));

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(jobs.len());
        }

        // Output numbering counts recognised job kinds only
        let mut job_number = 0;

        for (index, job) in jobs.iter().enumerate() {
            if let Some(ref mut pm) = self.progress_manager {
                pm.start_job(index, &job.name, job.screenshots);
            }

            match &job.kind {
                JobKind::Overlapping(config) => {
                    job_number += 1;
                    let sample = self.cli.textures.join(format!("{}.png", job.name));
                    match OverlappingModel::from_png_path(&sample, config.clone()) {
                        Ok(model) => {
                            self.run_job(model, job, index, job_number, &mut rng, &mut summary)?;
                        }
                        Err(error) => self.skip(job, &error.to_string(), &mut summary),
                    }
                }
                JobKind::Tiled(config) => {
                    job_number += 1;
                    let tileset = self.cli.textures.join(&job.name);
                    match TiledModel::from_directory(&tileset, config.clone()) {
                        Ok(model) => {
                            self.run_job(model, job, index, job_number, &mut rng, &mut summary)?;
                        }
                        Err(error) => self.skip(job, &error.to_string(), &mut summary),
                    }
                }
                JobKind::Unsupported(kind) => {
                    self.skip(job, &format!("{kind} not implemented"), &mut summary);
                }
            }

            if let Some(ref mut pm) = self.progress_manager {
                pm.complete_job(index);
            }
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(summary)
    }

    fn run_job<M: Model>(
        &mut self,
        model: M,
        job: &Job,
        index: usize,
        job_number: usize,
        rng: &mut StdRng,
        summary: &mut RunSummary,
    ) -> Result<()> {
        let mut driver = CollapseDriver::new(model);

        for screenshot in 0..job.screenshots {
            let mut rendered = false;

            for _ in 0..self.cli.attempts {
                let seed = rng.random::<u64>();
                let path = output_path(&self.cli.output, job_number, &job.name, seed, screenshot);
                let ident = path
                    .file_stem()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string();

                if driver.run(seed, job.limit) {
                    self.report(&format!("[{ident}]\tDONE"));
                    save_png(&driver.graphics()?, &path)?;
                    rendered = true;
                    break;
                }
                self.report(&format!("[{ident}]\tCONTRADICTION"));
            }

            if rendered {
                summary.rendered += 1;
            } else {
                summary.failed += 1;
            }

            if let Some(ref mut pm) = self.progress_manager {
                pm.update_job(index, screenshot + 1);
            }
        }

        Ok(())
    }

    fn skip(&self, job: &Job, reason: &str, summary: &mut RunSummary) {
        summary.skipped += 1;
        self.report(&format!("[{}]\tSKIPPED: {reason}", job.name));
    }

    fn report(&self, line: &str) {
        if let Some(ref pm) = self.progress_manager {
            pm.report(line);
        }
    }
}

/// Output file for one screenshot: `<dir>/<job> <name>+<seed hex> <screenshot>.png`
pub fn output_path(
    dir: &Path,
    job_number: usize,
    name: &str,
    seed: u64,
    screenshot: usize,
) -> PathBuf {
    dir.join(format!("{job_number} {name}+{seed:x} {screenshot}.png"))
}
