use glam::Vec2;
use stackflow::dump::{dump_stack, DumpOptions};
use stackflow::script::{parse_script, Card, ScriptRunner};
use stackflow::{color, Direction, FadingStyle, NavigationOptions, SeparationStyle, StackConfiguration, StackState};
use std::process::Command;
use std::time::Duration;

fn instant() -> StackConfiguration {
    StackConfiguration::default().with_transition_duration(Duration::ZERO)
}

fn run(config: StackConfiguration, source: &str) -> ScriptRunner {
    let commands = parse_script(source).expect("script should parse");
    let mut runner = ScriptRunner::new(config, Vec2::new(300.0, 600.0));
    runner.run(&commands);
    runner
}

fn name(card: &Card) -> String {
    card.name.clone()
}

#[test]
fn test_tree_dump_of_settled_stack() {
    let runner = run(instant(), "push a 300 100 Home\npush b 300 100\n");
    let out = dump_stack(runner.stack(), name, &DumpOptions::default());

    insta::assert_snapshot!(out.trim_end(), @r###"
    Stack settled(2) growing down content:(0,0 300x600)
    ├── [0] a "Home" first pos:(0,355) size:(300,144) opacity:0.90 tint
    ├── separator pos:(0,499) size:(300,1)
    └── [1] b last pop push pos:(0,500) size:(300,100) opacity:1.00 interactive
    mask: (0.50,1.00)->(0.50,0.00) stops:[0.17:1.00, 1.00:0.00, 1.00:0.00]
    "###);
}

#[test]
fn test_script_with_timing_and_gestures() {
    let script = "
        # three cards, then walk back with gestures
        push home 300 100
        push list 300 100
        push detail 300 100
        advance 250
        tap 150 450
        settle
    ";
    let config = StackConfiguration::default().with_transition_duration(Duration::from_millis(200));
    let runner = run(config, script);

    // The tap lands on `home` while `list` slides in; the pop it asks for
    // waits behind the push of `detail` and removes that one
    assert_eq!(runner.stack().state(), StackState::Settled(2));
    assert_eq!(runner.stack().top_content().map(|card| card.name.as_str()), Some("list"));
}

#[test]
fn test_script_changes_direction_and_separation() {
    let script = "
        direction right
        separation padding 10
        fading none
        push a 100 50
        push b 120 50
    ";
    let runner = run(instant(), script);
    let stack = runner.stack();
    let layout = stack.layout();

    assert_eq!(stack.configuration().growth_direction, Direction::Right);
    let a = stack.items()[0].id();
    let b = stack.items()[1].id();
    let head = layout.item_frame(b).unwrap();
    let below = layout.item_frame(a).unwrap();
    assert_eq!(head.position.x + head.size.x, 300.0, "head sits on the trailing edge");
    assert_eq!(below.position.x + below.size.x + 10.0, head.position.x);
    assert!(stack.fade().mask.is_none());
}

#[test]
fn test_swipes_in_script_are_carried_out() {
    let runner = run(instant(), "push a 300 100\nswipe up\nswipe up\nswipe down\n");
    let names: Vec<&str> = runner
        .stack()
        .items()
        .iter()
        .map(|item| item.content().name.as_str())
        .collect();
    assert_eq!(names, vec!["a", "card-1"]);
}

#[test]
fn test_clean_empties_the_stack() {
    let runner = run(instant(), "push a 300 100\npush b 300 100\nclean\npop 3\n");
    assert_eq!(runner.stack().state(), StackState::Empty);
    assert!(runner.stack().renderer().command_names().contains(&"remove_item"));
}

#[test]
fn test_configuration_json_round_trip() {
    let config = StackConfiguration::default()
        .with_growth_direction(Direction::Up)
        .with_separation_style(SeparationStyle::Line {
            thickness: 2.0,
            color: color::GRAY,
        })
        .with_fading_style(FadingStyle::Combined(vec![
            FadingStyle::Tint {
                color: color::BLACK,
                base_alpha: 0.7,
                alpha_decrement: Some(0.2),
            },
            FadingStyle::GradientMask { distance: 250.0 },
        ]))
        .with_navigation_options(NavigationOptions::SWIPE)
        .with_head_padding(16.0)
        .with_transition_duration(Duration::from_millis(300));

    let json = serde_json::to_string_pretty(&config).unwrap();
    let decoded: StackConfiguration = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, config);
    assert!(decoded.validate().is_ok());
}

#[test]
fn test_debug_binary_prints_tree() {
    let output = Command::new(env!("CARGO_BIN_EXE_stackflow-debug"))
        .args([
            "--width",
            "300",
            "--height",
            "600",
            "--duration-ms",
            "0",
            "-e",
            "push a 300 100",
            "-e",
            "push b 300 100",
        ])
        .output()
        .expect("failed to run stackflow-debug");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Stack settled(2) growing down"), "got:\n{}", stdout);
    assert!(stdout.contains("└── [1] b last pop push pos:(0,500) size:(300,100)"), "got:\n{}", stdout);
}

#[test]
fn test_debug_binary_rejects_bad_scripts() {
    let output = Command::new(env!("CARGO_BIN_EXE_stackflow-debug"))
        .args(["-e", "push a 300", "-e", "jump"])
        .output()
        .expect("failed to run stackflow-debug");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 1"), "got:\n{}", stderr);
}
