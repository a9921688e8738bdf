use std::{path::PathBuf, str::FromStr, time::Duration};

use anyhow::{Context, Result, bail};
use lifecore::{Pos2, pattern::DEFAULT_ALIVE_GLYPH};

/// Side of the dense grid (and of the sparse clamp) unless `--size` is given
const DEFAULT_SIZE: usize = 50;
const MAX_SIZE: usize = i32::MAX as usize;
/// Frames per second of the console front-end unless `--speed` is given
const DEFAULT_SPEED: u32 = 10;

pub struct Args {
    matches: getopts::Matches,
}

impl Args {
    fn options() -> getopts::Options {
        let mut opts = getopts::Options::new();
        opts.optflag("", "help", "print this help menu");
        opts.optopt("s", "seed", "seed pattern file (.rle or glyph rows)", "FILE");
        opts.optopt("", "glyph", "glyph marking a live cell (default O)", "CHAR");
        opts.optopt("", "speed", "generations per second", "FPS");
        opts.optflag("d", "debug", "manual single-step mode");
        opts.optopt("e", "engine", "engine strategy: dense or sparse", "ENGINE");
        opts.optopt("n", "size", "side of the grid (default 50)", "SIZE");
        opts.optflag("", "unbounded", "sparse engine without a grid clamp");
        opts.optopt("", "offset", "top-left of the seed (sparse engine)", "X,Y");
        opts.optopt("f", "fill", "fill the grid instead of seeding it", "TYPE");
        opts.optopt("g", "gens", "max number of generations", "COUNT");
        opts.optflag("c", "console", "run in console mode");
        opts.optflag("t", "threads", "enables multi-threading");
        opts.optopt("", "stats", "write stats csv to file", "FILE");
        opts
    }

    /// Parses the arguments, [`None`] if only help was requested
    fn new<T: AsRef<str>>(args: &[T]) -> Result<Option<Self>> {
        let opts = Self::options();
        let matches = opts.parse(args.iter().map(T::as_ref))?;
        if matches.opt_present("help") {
            println!("{}", opts.usage("usage: lifecore [options]"));
            return Ok(None);
        }
        if matches.opt_present("seed") && matches.opt_present("fill") {
            bail!("--seed and --fill cannot be combined");
        }
        Ok(Some(Self { matches }))
    }
    pub fn from_env() -> Result<Option<Self>> {
        let env = std::env::args().collect::<Vec<_>>();
        Self::new(&env[1..])
    }

    fn get<T>(&self, name: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.matches
            .opt_get(name)
            .with_context(|| format!("invalid value for --{name}"))
    }

    pub fn seed(&self) -> Option<PathBuf> {
        self.matches.opt_str("seed").map(PathBuf::from)
    }
    pub fn glyph(&self) -> Result<char> {
        Ok(self.get("glyph")?.unwrap_or(DEFAULT_ALIVE_GLYPH))
    }

    pub fn debug(&self) -> bool {
        self.matches.opt_present("debug")
    }
    pub fn console(&self) -> bool {
        self.matches.opt_present("console")
    }
    pub fn multithreading(&self) -> bool {
        self.matches.opt_present("threads")
    }

    /// Time between generations, if any
    ///
    /// The console always ticks at some rate, headless runs only when asked to.
    pub fn tick_interval(&self) -> Result<Option<Duration>> {
        let speed = match self.get::<u32>("speed")? {
            Some(0) => bail!("--speed must be positive"),
            Some(speed) => speed,
            None if self.console() => DEFAULT_SPEED,
            None => return Ok(None),
        };
        Ok(Some(Duration::from_secs(1) / speed))
    }
    pub fn generations(&self) -> Result<u64> {
        // no limit is as good as "infinity"
        Ok(self.get("gens")?.unwrap_or(u64::MAX))
    }

    pub fn engine(&self) -> Result<EngineKind> {
        Ok(self.get("engine")?.unwrap_or(EngineKind::Dense))
    }
    /// Side of the grid, at most `i32::MAX` so every cell has a coordinate
    pub fn size(&self) -> Result<usize> {
        match self.get("size")? {
            Some(0) => bail!("--size must be positive"),
            Some(size) if size > MAX_SIZE => bail!("--size must be at most {MAX_SIZE}"),
            size => Ok(size.unwrap_or(DEFAULT_SIZE)),
        }
    }
    /// Clamp of the sparse engine
    pub fn bounds(&self) -> Result<Option<usize>> {
        if self.matches.opt_present("unbounded") {
            Ok(None)
        } else {
            self.size().map(Some)
        }
    }
    pub fn offset(&self) -> Result<Pos2> {
        let Some(offset) = self.matches.opt_str("offset") else {
            return Ok(Pos2::zero());
        };
        let parsed = offset
            .split_once(',')
            .and_then(|(x, y)| Some(Pos2::new(x.trim().parse().ok()?, y.trim().parse().ok()?)));
        parsed.with_context(|| format!("invalid value for --offset: {offset:?}"))
    }

    pub fn fill_mode(&self) -> Result<Option<FillMode>> {
        self.get("fill")
    }

    pub fn stats_file(&self) -> Option<String> {
        self.matches.opt_str("stats")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    Dense,
    Sparse,
}
impl FromStr for EngineKind {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dense" => Ok(Self::Dense),
            "sparse" => Ok(Self::Sparse),
            _ => Err(UnknownChoice(s.to_owned())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown choice {0:?}")]
pub struct UnknownChoice(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    Random,
    Alternating,
    All,
    Empty,
}
impl FromStr for FillMode {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(Self::Random),
            "alternating" => Ok(Self::Alternating),
            "all" => Ok(Self::All),
            "empty" => Ok(Self::Empty),
            _ => Err(UnknownChoice(s.to_owned())),
        }
    }
}
impl FillMode {
    fn reserve_size(&self, side: i32) -> usize {
        let total = (side as usize) * (side as usize);
        match self {
            Self::Random => total.div_ceil(2),
            Self::Alternating => total.div_ceil(2),
            Self::All => total,
            Self::Empty => 0,
        }
    }
    fn fill_cell<R: rand::Rng>(&self, cell: Pos2, rng: &mut R) -> bool {
        match self {
            Self::Random => rng.random_bool(0.5),
            Self::Alternating => (cell.x + cell.y) % 2 == 0,
            Self::All => true,
            Self::Empty => false,
        }
    }
    /// Live cells of a `side x side` square filled in this mode, row-major
    pub fn create_alive(self, side: i32) -> Vec<Pos2> {
        let mut alive = Vec::new();
        let reserve_size = self.reserve_size(side);
        if reserve_size == 0 {
            // reserve_size indicates this will produce no alive cells
            return alive;
        }

        let mut rng = rand::rng();
        alive.reserve(reserve_size);
        for y in 0..side {
            for x in 0..side {
                let cell = Pos2 { x, y };
                if self.fill_cell(cell, &mut rng) {
                    alive.push(cell);
                }
            }
        }
        alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(args: &[&str]) -> Args {
        Args::new(args).expect("valid args").expect("not a help request")
    }

    fn pos(x: i32, y: i32) -> Pos2 {
        Pos2 { x, y }
    }

    #[test]
    fn defaults() {
        let args = args(&[]);

        assert_eq!(args.seed(), None);
        assert_eq!(args.glyph().unwrap(), 'O');
        assert_eq!(args.engine().unwrap(), EngineKind::Dense);
        assert_eq!(args.size().unwrap(), 50);
        assert_eq!(args.bounds().unwrap(), Some(50));
        assert_eq!(args.offset().unwrap(), Pos2::zero());
        assert_eq!(args.generations().unwrap(), u64::MAX);
        assert_eq!(args.tick_interval().unwrap(), None);
        assert!(!args.debug());
    }

    #[test]
    fn console_ticks_at_default_speed() {
        let args = args(&["--console"]);

        assert_eq!(args.tick_interval().unwrap(), Some(Duration::from_millis(100)));
    }

    #[test]
    fn speed_sets_tick_interval() {
        assert_eq!(
            args(&["--speed", "4"]).tick_interval().unwrap(),
            Some(Duration::from_millis(250))
        );
        assert!(args(&["--speed", "0"]).tick_interval().is_err());
    }

    #[test]
    fn engine_and_bounds_parse() {
        let args = args(&["-e", "sparse", "--unbounded", "--offset", "-3, 7", "--glyph", "#"]);

        assert_eq!(args.engine().unwrap(), EngineKind::Sparse);
        assert_eq!(args.bounds().unwrap(), None);
        assert_eq!(args.offset().unwrap(), pos(-3, 7));
        assert_eq!(args.glyph().unwrap(), '#');
    }

    #[test]
    fn bad_values_are_errors() {
        assert!(args(&["-e", "hashlife"]).engine().is_err());
        assert!(args(&["--offset", "3"]).offset().is_err());
        assert!(args(&["-n", "0"]).size().is_err());
        assert!(args(&["-n", "2147483648"]).size().is_err());
        assert_eq!(args(&["-n", "2147483647"]).size().unwrap(), 2147483647);
        assert!(args(&["--fill", "checkers"]).fill_mode().is_err());
    }

    #[test]
    fn seed_and_fill_are_exclusive() {
        assert!(Args::new(&["-s", "gun.txt", "-f", "all"]).is_err());
    }

    #[test]
    fn help_returns_none() {
        assert!(Args::new(&["--help"]).unwrap().is_none());
    }

    #[test]
    fn fill_mode_parses() {
        let args = args(&["--fill", "alternating"]);

        assert_eq!(args.fill_mode().unwrap(), Some(FillMode::Alternating));
    }

    #[test]
    fn create_alive_all_fills_grid() {
        let alive = FillMode::All.create_alive(2);

        assert_eq!(alive, vec![pos(0, 0), pos(1, 0), pos(0, 1), pos(1, 1)]);
    }

    #[test]
    fn create_alive_empty_is_empty() {
        assert!(FillMode::Empty.create_alive(5).is_empty());
    }

    #[test]
    fn create_alive_alternating_uses_parity() {
        let alive = FillMode::Alternating.create_alive(3);

        let expected = vec![pos(0, 0), pos(2, 0), pos(1, 1), pos(0, 2), pos(2, 2)];
        assert_eq!(alive, expected);
    }

    #[test]
    fn create_alive_random_is_within_bounds() {
        let side = 4;
        let alive = FillMode::Random.create_alive(side);

        assert!(alive.iter().all(|p| p.x >= 0 && p.y >= 0 && p.x < side && p.y < side));
    }
}
