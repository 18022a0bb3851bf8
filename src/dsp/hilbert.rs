//! 90 degree phase splitter built from two cascades of second order allpasses
//!
//! Gives an in-phase and quadrature pair that stay roughly 90 degrees apart
//! from about 20Hz up to 20kHz at 44.1/48k.  That is all a single sideband
//! frequency shifter needs.

const PATH_I: [f32; 4] = [0.402_192_12, 0.856_171_1, 0.972_290_95, 0.995_288_5];
const PATH_Q: [f32; 4] = [0.692_387_8, 0.936_065_43, 0.988_229_5, 0.998_748_85];

#[derive(Clone, Copy, Default)]
struct AllpassStage {
    coef: f32,
    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

impl AllpassStage {
    fn new(coef: f32) -> AllpassStage {
        AllpassStage {
            coef: coef * coef,
            ..Default::default()
        }
    }
    fn get_sample(&mut self, input: f32) -> f32 {
        let out = self.coef * (input + self.y2) - self.x2;
        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = out;
        out
    }
}

pub struct Hilbert {
    path_i: [AllpassStage; 4],
    path_q: [AllpassStage; 4],
    // the quadrature path runs one sample late
    last_input: f32,
}

impl Hilbert {
    pub fn new() -> Hilbert {
        Hilbert {
            path_i: PATH_I.map(AllpassStage::new),
            path_q: PATH_Q.map(AllpassStage::new),
            last_input: 0.0,
        }
    }

    /// Returns (in-phase, quadrature)
    pub fn get_sample(&mut self, input: f32) -> (f32, f32) {
        let mut i = input;
        for stage in self.path_i.iter_mut() {
            i = stage.get_sample(i);
        }
        let mut q = self.last_input;
        for stage in self.path_q.iter_mut() {
            q = stage.get_sample(q);
        }
        self.last_input = input;
        (i, q)
    }
}
