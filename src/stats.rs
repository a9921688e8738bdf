use std::{
    fs,
    io::{self, Write},
    path::Path,
    time::{Duration, Instant},
};

/// How often a progress report is produced
const REPORT_INTERVAL: Duration = Duration::from_millis(500);

pub trait Recorder {
    /// Records a completed generation
    fn record(&mut self, generation: u64, alive: usize);

    fn has_report(&self) -> bool;
    fn report(&mut self) -> String;
}

/// Reports generations per second, the generation counter and population
pub struct SimpleRecord {
    generation: u64,
    alive: usize,
    gens_in_report: usize,
    last_report: Instant,
}
impl SimpleRecord {
    pub fn new(alive: usize) -> Self {
        Self {
            generation: 0,
            alive,
            gens_in_report: 0,
            last_report: Instant::now(),
        }
    }
}
impl Recorder for SimpleRecord {
    fn record(&mut self, generation: u64, alive: usize) {
        self.generation = generation;
        self.gens_in_report += 1;
        self.alive = alive;
    }

    fn has_report(&self) -> bool {
        self.last_report.elapsed() >= REPORT_INTERVAL
    }
    fn report(&mut self) -> String {
        let gens_per_sec = self.gens_in_report as f64 / self.last_report.elapsed().as_secs_f64();
        // reset stats for next report
        self.last_report = Instant::now();
        self.gens_in_report = 0;

        format!(
            "{:.02}gen/s gen:{}, alive:{}",
            gens_per_sec, self.generation, self.alive
        )
    }
}

/// Keeps the timing and population of every generation for a csv dump
pub struct CsvRecord {
    inner: SimpleRecord,
    data: Vec<(u64, u128, usize)>,
    last: Instant,
}
impl CsvRecord {
    pub fn new(alive: usize) -> Self {
        Self {
            inner: SimpleRecord::new(alive),
            data: Vec::new(),
            last: Instant::now(),
        }
    }

    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        out.write_all(b"gen,delta_t,alive\n")?;
        for (generation, delta, alive) in &self.data {
            writeln!(out, "{},{},{}", generation, delta, alive)?;
        }
        out.flush()
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let file = fs::File::create(path)?;
        self.write_to(io::BufWriter::new(file))
    }
}
impl Recorder for CsvRecord {
    fn record(&mut self, generation: u64, alive: usize) {
        let delta = self.last.elapsed().as_micros();
        self.last = Instant::now();

        self.data.push((generation, delta, alive));
        self.inner.record(generation, alive);
    }

    fn has_report(&self) -> bool {
        self.inner.has_report()
    }
    fn report(&mut self) -> String {
        self.inner.report()
    }
}

pub enum SwitchRecorder {
    Csv(CsvRecord),
    Simple(SimpleRecord),
}
impl SwitchRecorder {
    pub fn new(alive: usize, csv: bool) -> Self {
        if csv {
            Self::Csv(CsvRecord::new(alive))
        } else {
            Self::Simple(SimpleRecord::new(alive))
        }
    }

    /// Writes the csv, a no-op when only simple reports were kept
    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        match self {
            Self::Csv(r) => r.save(path),
            Self::Simple(_) => Ok(()),
        }
    }
}
impl Recorder for SwitchRecorder {
    fn record(&mut self, generation: u64, alive: usize) {
        match self {
            Self::Csv(r) => r.record(generation, alive),
            Self::Simple(r) => r.record(generation, alive),
        }
    }
    fn has_report(&self) -> bool {
        match self {
            Self::Csv(r) => r.has_report(),
            Self::Simple(r) => r.has_report(),
        }
    }
    fn report(&mut self) -> String {
        match self {
            Self::Csv(r) => r.report(),
            Self::Simple(r) => r.report(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_names_generation_and_population() {
        let mut record = SimpleRecord::new(5);
        record.record(1, 4);
        record.record(2, 7);

        let report = record.report();
        assert!(report.ends_with("gen:2, alive:7"), "{report}");
        assert_eq!(record.gens_in_report, 0);
    }

    #[test]
    fn csv_lists_every_generation() {
        let mut record = CsvRecord::new(3);
        record.record(1, 3);
        record.record(2, 0);

        let mut out = Vec::new();
        record.write_to(&mut out).unwrap();
        let csv = String::from_utf8(out).unwrap();
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(lines[0], "gen,delta_t,alive");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("1,") && lines[1].ends_with(",3"));
        assert!(lines[2].starts_with("2,") && lines[2].ends_with(",0"));
    }

    #[test]
    fn simple_switch_saves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.csv");
        SwitchRecorder::new(0, false).save(&path).unwrap();

        assert!(!path.exists());
    }
}
