//! Progress reporting.

/// Pipeline phase being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Loading,
    ExpandingBlockstates,
    NormalizingModels,
    LoadingTextures,
    PackingAtlas,
    EncodingGeometry,
    WritingArchive,
    Done,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Stage::Loading => "Loading resource packs",
            Stage::ExpandingBlockstates => "Expanding blockstates",
            Stage::NormalizingModels => "Normalizing models",
            Stage::LoadingTextures => "Loading textures",
            Stage::PackingAtlas => "Packing atlas",
            Stage::EncodingGeometry => "Encoding geometry",
            Stage::WritingArchive => "Writing archive",
            Stage::Done => "Done",
        };
        f.write_str(label)
    }
}

/// Receives progress notifications. `fraction` is in 0..=1 within a stage.
pub trait ProgressSink {
    fn report(&mut self, stage: Stage, fraction: f32);

    /// Report `done` of `total` items.
    fn report_items(&mut self, stage: Stage, done: usize, total: usize) {
        let fraction = if total == 0 {
            1.0
        } else {
            done as f32 / total as f32
        };
        self.report(stage, fraction);
    }
}

impl<F: FnMut(Stage, f32)> ProgressSink for F {
    fn report(&mut self, stage: Stage, fraction: f32) {
        self(stage, fraction)
    }
}

/// Discards all progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _stage: Stage, _fraction: f32) {}
}
