use crate::wdl::WDL;

/// The expected score in `[0, 1]`, counting draws as half a win. WDL doesn't have to be normalized yet.
pub fn score_from_wdl(wdl: WDL<f32>) -> f32 {
    (wdl.value() / wdl.sum() + 1.0) / 2.0
}

/// The elo difference that corresponds to the score of `wdl`. WDL doesn't have to be normalized yet.
pub fn elo_from_wdl(wdl: WDL<f32>) -> f32 {
    let score = score_from_wdl(wdl);
    let elo = -400.0 * (1.0 / score - 1.0).log10();

    // fix annoying negative zero case
    elo + 0.0
}
