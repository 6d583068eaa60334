use alift::oracle::{self, GOLDEN_CASES, GoldenCase};
use libtest_mimic::{Arguments, Failed, Trial};

fn main() {
    let args = Arguments::from_args();

    let trials = GOLDEN_CASES
        .iter()
        .enumerate()
        .map(|(i, case)| {
            let case = *case;
            Trial::test(trial_name(i, &case), move || run_case(case))
        })
        .collect();

    libtest_mimic::run(&args, trials).exit();
}

fn trial_name(index: usize, case: &GoldenCase) -> String {
    let ident: String = case
        .note
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("golden::{index:02}_{}", ident.trim_matches('_'))
}

fn run_case(case: GoldenCase) -> Result<(), Failed> {
    let pipeline = oracle::golden_pipeline();
    let outcome = oracle::run_case(&pipeline, case);
    if outcome.passed() {
        Ok(())
    } else {
        Err(format!(
            "input:    {}\nexpected: {:?}\nactual:   {:?}",
            case.input,
            case.expected,
            outcome.actual_text()
        )
        .into())
    }
}
