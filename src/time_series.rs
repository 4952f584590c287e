/// One sample of the results graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphPoint {
    pub t: f64,
    pub wpm: f64,
    pub raw_wpm: f64,
    pub errors: u32,
}

impl GraphPoint {
    pub fn new(t: f64, wpm: f64, raw_wpm: f64, errors: u32) -> Self {
        Self {
            t,
            wpm,
            raw_wpm,
            errors,
        }
    }

    /// (t, wpm) pair for chart datasets.
    pub fn wpm_xy(&self) -> (f64, f64) {
        (self.t, self.wpm)
    }

    /// (t, raw wpm) pair for chart datasets.
    pub fn raw_xy(&self) -> (f64, f64) {
        (self.t, self.raw_wpm)
    }
}

impl From<GraphPoint> for (f64, f64) {
    fn from(p: GraphPoint) -> Self {
        (p.t, p.wpm)
    }
}
