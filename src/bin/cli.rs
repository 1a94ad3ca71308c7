//! GraphLab CLI 工具
//!
//! 在终端里运行图算法，输出表格或 JSON

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use graphlab::algorithm::AlgorithmKind;
use graphlab::cli::{self, GraphSource, PrintMode, Printer};
use graphlab::types::NodeId;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "graphlab")]
#[command(about = "GraphLab 图算法命令行工具")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// JSON 图快照文件
    #[arg(short, long, global = true, conflicts_with_all = ["csv", "scenario"])]
    graph: Option<PathBuf>,

    /// CSV 边列表（表头 from,to,weight）
    #[arg(long, global = true, conflicts_with = "scenario")]
    csv: Option<PathBuf>,

    /// CSV 边列表按有向图处理
    #[arg(long, global = true)]
    directed: bool,

    /// 内置场景 id（默认 default）
    #[arg(short, long, global = true)]
    scenario: Option<String>,

    /// 以 JSON 输出
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 列出内置场景
    Scenarios,

    /// 打印邻接矩阵、邻接表和边列表
    Repr,

    /// 运行算法（省略时使用场景建议的算法）
    Run {
        /// bfs, dfs, dijkstra, prim, kruskal, max-flow, fleury, hierholzer, bipartite
        algorithm: Option<AlgorithmKind>,

        /// 起点 / 源点
        #[arg(long)]
        start: Option<NodeId>,

        /// 终点 / 汇点
        #[arg(long)]
        end: Option<NodeId>,
    },
}

impl Args {
    fn source(&self) -> GraphSource {
        if let Some(path) = &self.graph {
            GraphSource::Json(path.clone())
        } else if let Some(path) = &self.csv {
            GraphSource::Csv {
                path: path.clone(),
                directed: self.directed,
            }
        } else {
            self.scenario
                .clone()
                .map(GraphSource::Scenario)
                .unwrap_or_default()
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    // 日志写到 stderr，stdout 只放结果
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let printer = Printer::new(if args.json {
        PrintMode::Json
    } else {
        PrintMode::Table
    });

    match execute(&args, &printer) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            // JSON 模式下结构化的失败记录写到 stdout
            let record = match printer.mode() {
                PrintMode::Json => err
                    .downcast_ref::<graphlab::Error>()
                    .and_then(|e| printer.print_error(e).ok()),
                PrintMode::Table => None,
            };
            match record {
                Some(json) => println!("{}", json),
                None => eprintln!("{} {:#}", "错误:".red().bold(), err),
            }
            ExitCode::FAILURE
        }
    }
}

fn execute(args: &Args, printer: &Printer) -> anyhow::Result<String> {
    let output = match &args.command {
        Commands::Scenarios => cli::list_scenarios(printer)?,
        Commands::Repr => {
            let loaded = cli::load_graph(&args.source()).context("载入图失败")?;
            cli::show_representations(&loaded, printer)?
        }
        Commands::Run {
            algorithm,
            start,
            end,
        } => {
            let loaded = cli::load_graph(&args.source()).context("载入图失败")?;
            cli::run_algorithm(&loaded, *algorithm, start.clone(), end.clone(), printer)?
        }
    };

    Ok(output)
}
