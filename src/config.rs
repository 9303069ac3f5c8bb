use std::env;

/// Course-group selection is baked into the query string; edit here (or set
/// PLAN_URL) when enrolment changes.
const DEFAULT_PLAN_URL: &str = "https://gobierno.ingenieriainformatica.uniovi.es/grado/plan/plan.php?y=25-26&t=s1&DS.T.2=DS.T.2&DS.S.3=DS.S.3&DS.L.3=DS.L.3&DS.TG.3=DS.TG.3&CVVS.T.1=CVVS.T.1&CVVS.S.2=CVVS.S.2&CVVS.L.1=CVVS.L.1&CVVS.TG.1=CVVS.TG.1&IR.T.1=IR.T.1&IR.S.2=IR.S.2&IR.L.1=IR.L.1&IR.TG.1=IR.TG.1&SI.T.2=SI.T.2&SI.S.2=SI.S.2&SI.L.1=SI.L.1&SI.TG.1=SI.TG.1&SR.T.1=SR.T.1&SR.S.1=SR.S.1&SR.L.2=SR.L.2&SR.TG.2=SR.TG.2&vista=web";

const DEFAULT_OUTPUT_PATH: &str = "index.html";

/// The env-overridable settings for one run.
pub struct ScrapeConfig {
    pub plan_url: String,
    pub output_path: String,
}

impl ScrapeConfig {
    pub fn from_env() -> Self {
        let plan_url = env::var("PLAN_URL").unwrap_or_else(|_| DEFAULT_PLAN_URL.to_string());
        let output_path =
            env::var("OUTPUT_PATH").unwrap_or_else(|_| DEFAULT_OUTPUT_PATH.to_string());
        Self {
            plan_url,
            output_path,
        }
    }
}
