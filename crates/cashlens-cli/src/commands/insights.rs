//! Insight command implementations (forecast, anomalies, recommendations)

use anyhow::Result;
use cashlens_core::db::Database;
use cashlens_core::insights::{InsightEngine, Segment};
use cashlens_core::models::{Recommendation, Tip};
use cashlens_core::InsightsConfig;
use chrono::Utc;

use super::truncate;

pub fn cmd_forecast(db: &Database, user_id: &str, config: InsightsConfig, json: bool) -> Result<()> {
    let engine = InsightEngine::for_database(db, config);
    let series = engine.forecast(user_id, Utc::now())?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "forecast": series }))?
        );
        return Ok(());
    }

    println!();
    println!("📈 Cash-flow Forecast");
    println!("   ─────────────────────────────");

    for point in &series {
        let marker = match point.segment {
            Segment::Historical => " ",
            Segment::Projected => "~",
        };
        println!("   {} {} │ {:>12.2}", marker, point.label, point.value);
    }

    println!();
    println!("   ~ projected from the mean of the last 7 days");

    Ok(())
}

pub fn cmd_anomalies(db: &Database, user_id: &str, config: InsightsConfig, json: bool) -> Result<()> {
    let engine = InsightEngine::for_database(db, config);
    let findings = engine.anomalies(user_id, Utc::now())?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "anomalies": findings }))?
        );
        return Ok(());
    }

    if findings.is_empty() {
        println!("✅ Nothing unusual in the last 60 days.");
        return Ok(());
    }

    println!();
    println!("🚨 Anomalies ({})", findings.len());
    println!("   ─────────────────────────────────────────────────────────────");

    for finding in &findings {
        println!(
            "   {} │ {:<17} │ {}",
            finding.date.format("%Y-%m-%d"),
            finding.kind.as_str(),
            truncate(&finding.message, 50)
        );
    }

    Ok(())
}

pub fn cmd_recommend(db: &Database, user_id: &str, config: InsightsConfig, json: bool) -> Result<i64> {
    let engine = InsightEngine::for_database(db, config);
    let recommendation = engine.generate_recommendation(user_id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendation)?);
    } else {
        println!("💡 New recommendation [{}]", recommendation.id);
        print_recommendation(&recommendation);
    }

    Ok(recommendation.id)
}

pub fn cmd_recommendations(
    db: &Database,
    user_id: &str,
    config: InsightsConfig,
    json: bool,
) -> Result<()> {
    let engine = InsightEngine::for_database(db, config);
    let history = engine.list_recommendations(user_id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&history)?);
        return Ok(());
    }

    if history.is_empty() {
        println!("No recommendations yet. Generate one with:");
        println!("  cashlens recommend");
        return Ok(());
    }

    println!();
    println!("💡 Recommendations ({})", history.len());
    println!("   ─────────────────────────────");

    for recommendation in &history {
        println!(
            "   [{}] {}",
            recommendation.id,
            recommendation.created_at.format("%Y-%m-%d %H:%M")
        );
        print_recommendation(recommendation);
    }

    Ok(())
}

fn print_recommendation(recommendation: &Recommendation) {
    match &recommendation.tip {
        Tip::PercentOfIncome(payload) => {
            println!(
                "      Save {:.0}% of income (income {}, expenses {})",
                payload.save_rate * 100.0,
                payload.income,
                payload.expense
            );
        }
    }
}
