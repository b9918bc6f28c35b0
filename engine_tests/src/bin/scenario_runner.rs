//! Geometry scenario runner.
//!
//! Runs the fixed geometry scenarios plus seeded property checks against the
//! math kernel, then writes JSON and text reports.
//!
//! Usage: `scenario_runner [config.json] [--seed N] [--samples N] [--tolerance F] [--out DIR]`

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, ensure, Context};
use engine_math::config::RunnerConfig;
use engine_math::prelude::*;
use engine_math::report::{ReportBuilder, TestResult};
use tracing::{info, warn};

fn parse_args() -> anyhow::Result<RunnerConfig> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cfg = RunnerConfig::default();
    let mut overrides = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            flag @ ("--seed" | "--samples" | "--tolerance" | "--out") => {
                let value = args
                    .get(i + 1)
                    .with_context(|| format!("{flag} needs a value"))?;
                overrides.push((flag, value.clone()));
                i += 2;
            }
            path if !path.starts_with("--") => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("read config {path}"))?;
                cfg = RunnerConfig::from_json_str(&text)
                    .with_context(|| format!("parse config {path}"))?;
                i += 1;
            }
            other => bail!("unknown argument {other}"),
        }
    }

    for (flag, value) in overrides {
        match flag {
            "--seed" => cfg.seed = value.parse().context("--seed")?,
            "--samples" => cfg.samples = value.parse().context("--samples")?,
            "--tolerance" => cfg.tolerance = value.parse().context("--tolerance")?,
            _ => cfg.report_dir = value,
        }
    }
    Ok(cfg)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cfg = parse_args()?;
    info!(seed = cfg.seed, samples = cfg.samples, tolerance = cfg.tolerance, out = %cfg.report_dir, "Starting scenario run");

    let mut builder = ReportBuilder::new("Geometry Scenarios")
        .subtitle("Math kernel scenarios and sampled properties")
        .metadata("seed", &cfg.seed.to_string())
        .metadata("samples", &cfg.samples.to_string())
        .metadata("tolerance", &cfg.tolerance.to_string());

    run_scenarios(&mut builder);
    let mut rng = MathRng::seeded(cfg.seed);
    run_properties(&mut builder, &mut rng, &cfg);

    let report = builder.build();
    let stats = report.overall_stats();
    for failed in report.failures() {
        warn!(id = %failed.id, name = %failed.name, reason = failed.message.as_deref().unwrap_or(""), "Check failed");
    }
    info!(
        total = stats.total,
        passed = stats.passed,
        failed = stats.failed,
        pass_rate = %format!("{:.1}%", stats.pass_rate()),
        "Run complete"
    );

    let out = PathBuf::from(&cfg.report_dir);
    std::fs::create_dir_all(&out).with_context(|| format!("create {}", out.display()))?;
    let json_path = out.join("geometry-scenarios.json");
    let text_path = out.join("geometry-scenarios.txt");
    report.save_json(&json_path)?;
    report.save_text(&text_path)?;
    info!(json = %json_path.display(), text = %text_path.display(), "Reports saved");

    if !report.all_passed() {
        bail!("{} of {} checks failed", stats.failed, stats.total);
    }
    Ok(())
}

/// Times `f` and records its outcome.
fn run_check<F>(builder: &mut ReportBuilder, id: &str, name: &str, category: &str, description: &str, f: F)
where
    F: FnOnce() -> anyhow::Result<()>,
{
    let start = Instant::now();
    let outcome = f();
    builder.push(
        TestResult::new(id, name, category)
            .with_description(description)
            .from_outcome(start.elapsed(), outcome),
    );
}

fn run_scenarios(builder: &mut ReportBuilder) {
    const CATEGORY: &str = "Scenarios";
    let cube = BoundingBox::new(Vec3::ZERO, Vec3::splat(2.0));

    run_check(builder, "GEO-001", "Box contains center", CATEGORY, "Box (0,0,0)-(2,2,2) fully contains (1,1,1)", || {
        let got = cube.contains(&Vec3::ONE);
        ensure!(got == Containment::Fully, "got {got:?}");
        Ok(())
    });

    run_check(builder, "GEO-002", "Box excludes outside point", CATEGORY, "Box (0,0,0)-(2,2,2) does not contain (3,3,3)", || {
        let got = cube.contains(&Vec3::splat(3.0));
        ensure!(got == Containment::None, "got {got:?}");
        Ok(())
    });

    run_check(builder, "GEO-003", "Sphere contains sphere", CATEGORY, "Radius 5 sphere fully contains a unit sphere at (1,0,0)", || {
        let outer = BoundingSphere::new(Vec3::ZERO, 5.0);
        let got = outer.contains(&BoundingSphere::new(Vec3::UNIT_X, 1.0));
        ensure!(got == Containment::Fully, "got {got:?}");
        Ok(())
    });

    run_check(builder, "GEO-004", "Translation", CATEGORY, "Translation (1,2,3) moves the origin to (1,2,3)", || {
        let got = Mat4::translation(Vec3::new(1.0, 2.0, 3.0)) * Vec3::ZERO;
        ensure!(got == Vec3::new(1.0, 2.0, 3.0), "got {got}");
        Ok(())
    });

    run_check(builder, "GEO-005", "Plane sides", CATEGORY, "Ground plane classifies points above, below and on it", || {
        let ground = Plane::new(Vec3::UP, 0.0);
        let cases = [
            (Vec3::new(0.0, 5.0, 0.0), IntersectionType::Front),
            (Vec3::new(0.0, -5.0, 0.0), IntersectionType::Back),
            (Vec3::ZERO, IntersectionType::Intersect),
        ];
        for (point, expected) in cases {
            let got = ground.intersect(point);
            ensure!(got == expected, "{point}: expected {expected:?}, got {got:?}");
        }
        Ok(())
    });

    run_check(builder, "GEO-006", "Ray hits box", CATEGORY, "Ray from (0,0,-5) along +Z hits the unit box", || {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::UNIT_Z);
        let bbox = BoundingBox::new(Vec3::splat(-1.0), Vec3::ONE);
        ensure!(ray.intersects(&bbox), "ray missed");
        Ok(())
    });
}

fn run_properties(builder: &mut ReportBuilder, rng: &mut MathRng, cfg: &RunnerConfig) {
    const CATEGORY: &str = "Properties";
    if cfg.samples == 0 {
        builder.push(TestResult::new("PROP-000", "Sampled properties", CATEGORY).skip("samples is 0"));
        return;
    }

    let tol = cfg.tolerance;
    let points: Vec<Vec3> = (0..cfg.samples)
        .map(|_| rng.vec3_between(Vec3::splat(-100.0), Vec3::splat(100.0)))
        .collect();
    let transforms: Vec<Mat4> = (0..cfg.samples)
        .map(|_| {
            let rot = Mat4::rotation_xyz(
                rng.float_between(0.0, 360.0),
                rng.float_between(0.0, 360.0),
                rng.float_between(0.0, 360.0),
            );
            let scale = rng.vec3_between(Vec3::splat(0.5), Vec3::splat(2.0));
            let offset = rng.vec3_between(Vec3::splat(-10.0), Vec3::splat(10.0));
            Mat4::scale(scale) * rot * Mat4::translation(offset)
        })
        .collect();

    run_check(builder, "PROP-001", "Normalize idempotence", CATEGORY, "normalize(normalize(v)) == normalize(v)", || {
        for v in &points {
            let once = v.normalize();
            ensure!(once.normalize().equal_enough(once, tol), "{v}");
        }
        ensure!(Vec3::ZERO.normalize() == Vec3::ZERO, "zero vector changed");
        Ok(())
    });

    run_check(builder, "PROP-002", "Identity law", CATEGORY, "M * I == M and I * M == M", || {
        for m in &transforms {
            ensure!(*m * Mat4::IDENTITY == *m, "M * I differs for {m}");
            ensure!((Mat4::IDENTITY * *m).equal_enough(m, tol), "I * M differs for {m}");
        }
        Ok(())
    });

    run_check(builder, "PROP-003", "Inverse law", CATEGORY, "M * inverse(M) is the identity", || {
        for m in &transforms {
            let inv = m.try_inverse().with_context(|| format!("singular sample {m}"))?;
            ensure!((*m * inv).equal_enough(&Mat4::IDENTITY, tol), "M * M^-1 off for {m}");
        }
        Ok(())
    });

    run_check(builder, "PROP-004", "Binary round-trip", CATEGORY, "load(save(x)) == x bit for bit", || {
        for (p, m) in points.iter().zip(&transforms) {
            round_trip(*p)?;
            round_trip(*m)?;
            round_trip(Quat::from_rotation_matrix(m).normalize())?;
            round_trip(BoundingSphere::new(*p, p.length()))?;
            round_trip(Ray::new(*p, p.normalize()))?;
        }
        Ok(())
    });

    run_check(builder, "PROP-005", "Symmetry", CATEGORY, "distance and dot commute, cross anti-commutes", || {
        for pair in points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            ensure!(a.distance(b) == b.distance(a), "distance {a} / {b}");
            ensure!(a.dot(b) == b.dot(a), "dot {a} / {b}");
            ensure!(a.cross(b) == -b.cross(a), "cross {a} / {b}");
        }
        Ok(())
    });

    run_check(builder, "PROP-006", "Box containment", CATEGORY, "Sampled points lie inside their bounding box", || {
        let bbox = BoundingBox::from_points(&points).context("no sample points")?;
        for p in &points {
            ensure!(bbox.contains(p) == Containment::Fully, "{p} outside {bbox}");
        }
        let beyond = bbox.max + Vec3::ONE;
        ensure!(bbox.contains(&beyond) == Containment::None, "{beyond} inside {bbox}");
        Ok(())
    });
}

fn round_trip<T>(value: T) -> anyhow::Result<()>
where
    T: BinaryCodec + PartialEq + std::fmt::Debug,
{
    let back = decode_from_bytes::<T>(&encode_to_bytes(&value)?)?;
    ensure!(back == value, "{value:?} came back as {back:?}");
    Ok(())
}
