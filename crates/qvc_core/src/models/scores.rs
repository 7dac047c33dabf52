//! Static model score card shown next to the race.

/// Display scores for one model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelScores {
    pub model: &'static str,
    pub accuracy: &'static str,
    pub f1_score: &'static str,
    pub energy_estimate: &'static str,
}

impl ModelScores {
    /// Label/value rows in display order.
    pub fn rows(&self) -> [(&'static str, &'static str); 3] {
        [
            ("Accuracy", self.accuracy),
            ("F1-Score", self.f1_score),
            ("Energy Est.", self.energy_estimate),
        ]
    }
}

pub const QUANTUM_SCORES: ModelScores = ModelScores {
    model: "Quantum AI",
    accuracy: "98.4%",
    f1_score: "0.97",
    energy_estimate: "-72.3 kcal/mol",
};

pub const CLASSICAL_SCORES: ModelScores = ModelScores {
    model: "Classical AI",
    accuracy: "88.9%",
    f1_score: "0.85",
    energy_estimate: "-61.8 kcal/mol",
};

/// Both score cards, quantum first.
pub fn model_scores() -> [ModelScores; 2] {
    [QUANTUM_SCORES, CLASSICAL_SCORES]
}
