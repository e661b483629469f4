use num_complex::Complex64;

pub struct Step {
    pub operation: String,
    pub result: Complex64,
}

pub struct EvaluationTrace {
    pub steps: Vec<Step>,
    pub detailed_mode: bool,
}

impl EvaluationTrace {
    pub fn new(detailed_mode: bool) -> Self {
        EvaluationTrace {
            steps: Vec::new(),
            detailed_mode,
        }
    }

    /// Steps are only kept in detailed mode; `operation` is built lazily so
    /// plain evaluation never formats anything.
    pub fn add_step(&mut self, operation: impl FnOnce() -> String, result: Complex64) {
        if self.detailed_mode {
            self.steps.push(Step {
                operation: operation(),
                result,
            });
        }
    }
}
