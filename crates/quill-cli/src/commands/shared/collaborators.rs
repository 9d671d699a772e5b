use quill_config::QuillConfig;
use quill_gate::collaborators::{BrandPenalties, GuidelineBrandChecker, MarkerAccuracyValidator};

/// Default collaborators tuned by the `[accuracy]` and `[brand]` sections.
pub fn from_config(config: &QuillConfig) -> (MarkerAccuracyValidator, GuidelineBrandChecker) {
    let brand = &config.brand;
    (
        MarkerAccuracyValidator {
            flag_penalty: config.accuracy.flag_penalty,
        },
        GuidelineBrandChecker::new(BrandPenalties {
            forbidden_term: brand.forbidden_penalty,
            missing_term: brand.missing_penalty,
            long_sentence: brand.long_sentence_penalty,
        }),
    )
}
