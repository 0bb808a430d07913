//! Integration tests for the loanmc simulation engine.

use approx::assert_relative_eq;
use loanmc_core::{LoanTerms, LoanTranche, Portfolio, RateSensitivity};
use loanmc_sim::prelude::*;
use loanmc_sim::stress::standard;

fn reference_portfolio() -> Portfolio {
    Portfolio::homogeneous(50, LoanTerms::standard()).unwrap()
}

#[test]
fn test_reference_run_distribution() {
    let config = SimulationConfig::default().with_seed(20_240_601);
    let outcome = MonteCarloEngine::new(config)
        .unwrap()
        .run(&reference_portfolio())
        .unwrap();
    let summary = outcome.summary().unwrap();

    assert_eq!(summary.count, 5_000);
    // 50 loans of 10k at 10% discounted near 8%, less defaults
    assert!(
        (495_000.0..515_000.0).contains(&summary.mean),
        "mean {}",
        summary.mean
    );
    assert!(
        (19_000.0..25_000.0).contains(&summary.std_dev),
        "std {}",
        summary.std_dev
    );
    assert!(summary.percentile_5 < summary.median);
    assert!(summary.median < summary.percentile_95);

    let rates = outcome.discount_rate_summary().unwrap();
    assert_relative_eq!(rates.mean, 0.08, epsilon = 0.002);
    assert_relative_eq!(rates.std_dev, 0.02, epsilon = 0.002);
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_matches_sequential() {
    let portfolio = reference_portfolio();
    let sequential = SimulationConfig::sequential()
        .with_simulations(600)
        .with_seed(9);
    let parallel = sequential.clone().with_parallel(true).with_threshold(1);
    assert!(!sequential.should_parallelize(600));
    assert!(parallel.should_parallelize(600));

    let a = MonteCarloEngine::new(sequential).unwrap().run(&portfolio).unwrap();
    let b = MonteCarloEngine::new(parallel).unwrap().run(&portfolio).unwrap();

    assert_eq!(a.portfolio_values, b.portfolio_values);
    assert_eq!(a.discount_rates, b.discount_rates);
    assert_eq!(a.defaults, b.defaults);
    assert_eq!(a.prepayments, b.prepayments);
}

#[cfg(not(feature = "parallel"))]
#[test]
fn test_parallel_request_runs_sequentially_without_feature() {
    let config = SimulationConfig::default().with_parallel(true).with_threshold(1);
    assert!(!config.should_parallelize(10_000));
}

#[test]
fn test_different_seeds_differ() {
    let portfolio = reference_portfolio();
    let run = |seed| {
        MonteCarloEngine::new(SimulationConfig::sequential().with_simulations(50).with_seed(seed))
            .unwrap()
            .run(&portfolio)
            .unwrap()
    };
    assert_ne!(run(1).portfolio_values, run(2).portfolio_values);
}

#[test]
fn test_riskless_book_at_coupon_is_worth_principal() {
    let portfolio = Portfolio::homogeneous(50, LoanTerms::new(10_000.0, 0.10, 10)).unwrap();
    let config = SimulationConfig::sequential()
        .with_simulations(100)
        .with_seed(1)
        .with_base_discount_rate(0.10)
        .with_sensitivity(RateSensitivity::insensitive());

    // the shock moves coupon and discount rate together, so par holds on every path
    let outcome = MonteCarloEngine::new(config).unwrap().run(&portfolio).unwrap();
    for (value, rate) in outcome.portfolio_values.iter().zip(&outcome.discount_rates) {
        if *rate > 0.0 {
            assert_relative_eq!(*value, 500_000.0, epsilon = 1e-4);
        }
    }
}

#[test]
fn test_mixed_tranches_use_longest_horizon() {
    let portfolio = Portfolio::builder()
        .name("mixed")
        .add_tranche(LoanTranche::new("short", 10, LoanTerms::new(5_000.0, 0.06, 3)))
        .add_tranche(LoanTranche::new("long", 5, LoanTerms::new(20_000.0, 0.07, 15)))
        .build()
        .unwrap();
    let config = SimulationConfig::sequential()
        .with_simulations(50)
        .with_seed(4)
        .with_rate_shock_std(0.0)
        .with_base_discount_rate(0.0);

    let outcome = MonteCarloEngine::new(config).unwrap().run(&portfolio).unwrap();
    assert_eq!(outcome.horizon_years, 15);
    assert_eq!(outcome.loan_count, 15);

    // undiscounted riskless value is the sum of all scheduled installments
    let short = amortization_schedule(&LoanTerms::new(5_000.0, 0.06, 3), 0.0).unwrap();
    let long = amortization_schedule(&LoanTerms::new(20_000.0, 0.07, 15), 0.0).unwrap();
    let expected = 10.0 * short.iter().map(|r| r.payment).sum::<f64>()
        + 5.0 * long.iter().map(|r| r.payment).sum::<f64>();
    assert_relative_eq!(outcome.portfolio_values[0], expected, epsilon = 1e-6);
}

#[test]
fn test_stress_scenarios_against_baseline() {
    let config = SimulationConfig::default()
        .with_simulations(400)
        .with_seed(77);
    let results = run_stress_scenarios(
        &config,
        &reference_portfolio(),
        &[standard::baseline(), standard::rates_up_200()],
    )
    .unwrap();

    assert_eq!(results[0].mean_change, 0.0);
    assert!(results[1].mean_change < 0.0);
    assert!(results[1].mean_change_pct < 0.0);
    assert_eq!(worst_case(&results).unwrap().scenario_name, "Rates +200bp");
}

#[test]
fn test_stress_baseline_matches_plain_run() {
    let config = SimulationConfig::sequential()
        .with_simulations(200)
        .with_seed(11);
    let portfolio = reference_portfolio();

    let plain = MonteCarloEngine::new(config.clone())
        .unwrap()
        .run(&portfolio)
        .unwrap()
        .summary()
        .unwrap();
    let stressed = run_stress_scenarios(&config, &portfolio, &[standard::baseline()]).unwrap();

    assert_eq!(stressed[0].summary, plain);
}

#[test]
fn test_report_text_block() {
    let portfolio = reference_portfolio();
    let outcome = MonteCarloEngine::new(SimulationConfig::default().with_simulations(500).with_seed(3))
        .unwrap()
        .run(&portfolio)
        .unwrap();
    let text = ValuationReport::new(&portfolio, &outcome, 0.95)
        .unwrap()
        .render_text()
        .unwrap();

    let mut lines = text.lines();
    assert_eq!(lines.next(), Some(REPORT_TITLE));
    assert_eq!(lines.next(), Some("Number of Loans: 50"));
    assert_eq!(lines.next(), Some("Simulations: 500"));
    let mean_line = lines.next().unwrap();
    assert!(mean_line.starts_with("Mean Portfolio Value: $"));
    // thousands separator and cents
    assert!(mean_line.contains(','));
    assert_eq!(mean_line.rsplit('.').next().map(str::len), Some(2));
}

#[test]
fn test_outcome_serializes() {
    let outcome = MonteCarloEngine::new(SimulationConfig::sequential().with_simulations(10).with_seed(1))
        .unwrap()
        .run(&reference_portfolio())
        .unwrap();
    let json = serde_json::to_string(&outcome).unwrap();
    let back: SimulationOutcome = serde_json::from_str(&json).unwrap();
    assert_eq!(back.seed, 1);
    assert_eq!(back.portfolio_values.len(), 10);
}
