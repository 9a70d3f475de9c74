use clap::Parser;
use diary_eval_rust::{batch, cli, error, normalizer, report, scanner};
use cli::{Cli, Commands};
use error::Result;
use indicatif::ProgressBar;
use normalizer::MealAliasConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate { predicted, ground_truth, output, alias } => {
            println!("📒 diary-eval - 精度評価\n");

            let aliases = load_aliases(alias.as_deref())?;

            // 1. 読み込み
            println!("[1/2] 入力を読み込み中...");
            let pred_doc = scanner::load_document(&predicted)?;
            let gt_doc = scanner::load_document(&ground_truth)?;
            println!("✔ 読み込み完了\n");

            // 2. 評価
            println!("[2/2] 評価中...");
            let evaluation =
                diary_eval_rust::evaluator::evaluate_with_aliases(&pred_doc, &gt_doc, &aliases)?;
            println!("✔ 評価完了\n");

            report::print_summary(&evaluation, cli.verbose);

            if let Some(output_path) = output {
                report::write_json(&output_path, &evaluation)?;
                println!("\n✔ レポートを保存: {}", output_path.display());
            }

            println!("\n✅ 完了");
        }

        Commands::Batch { folder, output, pred_suffix, truth_suffix, alias } => {
            println!("📒 diary-eval - 一括評価\n");

            let aliases = load_aliases(alias.as_deref())?;

            // 1. ペア探索
            println!("[1/3] ペアを探索中...");
            let pairs = scanner::scan_pairs(&folder, &pred_suffix, &truth_suffix)?;
            if pairs.is_empty() {
                return Err(error::DiaryEvalError::NoPairsFound(
                    folder.display().to_string(),
                ));
            }
            println!("✔ {}ペアを検出\n", pairs.len());

            // 2. 並列評価
            println!("[2/3] 評価中...");
            let progress = ProgressBar::new(pairs.len() as u64);
            let outcomes = batch::evaluate_pairs(&pairs, &aliases, &progress);
            progress.finish_and_clear();
            println!("✔ 評価完了\n");

            // 3. レポート保存
            println!("[3/3] レポートを保存中...");
            let output_dir = output.unwrap_or_else(|| folder.clone());
            std::fs::create_dir_all(&output_dir)?;

            for outcome in &outcomes {
                match &outcome.result {
                    Ok(evaluation) => {
                        let path = output_dir.join(format!("{}.report.json", outcome.stem));
                        report::write_json(&path, evaluation)?;
                        if cli.verbose {
                            println!("  ✔ {}", path.display());
                        }
                    }
                    Err(e) => {
                        eprintln!("  ❌ {}: {}", outcome.stem, e);
                    }
                }
            }

            let summary = batch::summarize(&outcomes);
            let summary_path = output_dir.join("batch_summary.json");
            report::write_json(&summary_path, &summary)?;
            println!("✔ サマリを保存: {}\n", summary_path.display());

            report::print_batch_summary(&summary);

            println!("\n✅ 完了");
        }

        Commands::Aliases => {
            let config = MealAliasConfig::builtin();
            let mut entries: Vec<_> = config.meal_type.iter().collect();
            entries.sort_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(b.0)));

            println!("組み込みエイリアステーブル:");
            for (raw, meal) in entries {
                println!("  {} -> {}", raw, meal);
            }
        }
    }

    Ok(())
}

fn load_aliases(path: Option<&std::path::Path>) -> Result<MealAliasConfig> {
    let mut config = MealAliasConfig::builtin();
    if let Some(alias_path) = path {
        let custom = MealAliasConfig::from_file(alias_path)?;
        config.merge(&custom);
    }
    Ok(config)
}
