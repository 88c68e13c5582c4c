use rand::rngs::StdRng;
use rand::SeedableRng;
use spine_ik::driver::{Scene, SceneConfig};
use spine_ik::outline;
use std::env;
use std::process::ExitCode;

const DEFAULT_SEED: u64 = 0x5eed;
const DEFAULT_TICKS: u64 = 600;
const LOG_EVERY: u64 = 60;

fn parse_arg(args: &[String], index: usize, default: u64) -> Result<u64, String> {
    match args.get(index) {
        Some(raw) => raw
            .parse()
            .map_err(|e| format!("argument {index} ({raw:?}): {e}")),
        None => Ok(default),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let (seed, ticks) = match (
        parse_arg(&args, 1, DEFAULT_SEED),
        parse_arg(&args, 2, DEFAULT_TICKS),
    ) {
        (Ok(seed), Ok(ticks)) => (seed, ticks),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("usage: spine-demo [seed] [ticks]\n{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut rng = StdRng::seed_from_u64(seed);
    let mut scene = match Scene::new(SceneConfig::default(), &mut rng) {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("Scene setup failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut skipped = 0;
    let mut clamped = 0;
    for tick in 1..=ticks {
        let summary = scene.tick(&mut rng);
        skipped += summary.skipped;
        clamped += summary.clamped_joints;

        if tick % LOG_EVERY == 0 {
            for (i, agent) in scene.agents().iter().enumerate() {
                let head = agent.chain().head();
                log::info!(
                    "tick {tick} agent {i}: head {} facing {:.3}, target {}",
                    head.position,
                    head.heading,
                    agent.target()
                );
            }
        }
    }

    println!("seed {seed}, {ticks} ticks, {skipped} skipped, {clamped} joint clamps");
    for (i, agent) in scene.agents().iter().enumerate() {
        let chain = agent.chain();
        let segments = match outline::body_curve(chain) {
            Ok(segments) => segments.len(),
            Err(e) => {
                log::error!("outline for agent {i} failed: {e}");
                return ExitCode::FAILURE;
            }
        };
        println!(
            "agent {i}: head {} tail {} outline {} points, {segments} curve segments",
            chain.head().position,
            chain.tail().position,
            outline::body_outline(chain).len()
        );
    }

    ExitCode::SUCCESS
}
