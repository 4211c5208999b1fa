//! HanoiVM Ternary Coprocessor - CLI Entry Point
//!
//! Commands:
//! - `hanoi-coproc run <script>` - Drive a fresh device with a register script
//! - `hanoi-coproc demo` - Walk one full stack session with trace output
//! - `hanoi-coproc test` - Run the built-in self-test

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hanoi-coproc")]
#[command(version = "0.1.0")]
#[command(about = "Memory-mapped balanced ternary coprocessor emulator for HanoiVM")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a register script against a fresh device
    Run {
        /// Path to the script file
        script: String,
        /// Print every directive as it executes
        #[arg(short, long)]
        trace: bool,
        /// Write a JSON snapshot of the final device state
        #[arg(long)]
        snapshot: Option<String>,
    },
    /// Walk a scripted stack session step by step
    Demo,
    /// Run the built-in self-test
    Test,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run { script, trace, snapshot }) => {
            run_script(&script, trace, snapshot);
        }
        Some(Commands::Demo) => {
            run_demo();
        }
        Some(Commands::Test) => {
            run_self_test();
        }
        None => {
            println!("HanoiVM Ternary Coprocessor v0.1.0");
            println!("A memory-mapped balanced ternary coprocessor emulator");
            println!();
            println!("Use --help for available commands");
            println!();
            demo_ternary_primitives();
        }
    }
}

fn run_script(path: &str, trace: bool, snapshot: Option<String>) {
    use hanoi_coproc::host::{Script, ScriptOp};
    use hanoi_coproc::{Coprocessor, HostDriver};

    println!("🔧 Running: {}", path);

    let script = match Script::load(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("❌ Failed to load script: {}", e);
            std::process::exit(1);
        }
    };

    if script.is_empty() {
        eprintln!("❌ No directives to execute");
        std::process::exit(1);
    }

    println!("📂 Loaded {} directives", script.len());
    println!();
    println!("━━━ Session ━━━");

    let mut driver = HostDriver::new(Coprocessor::new());
    let mut faults = 0u32;

    for op in &script.ops {
        match op {
            ScriptOp::Input(vector) => {
                driver.load_operand(vector);
                if trace {
                    println!("input  {}", vector);
                }
            }
            ScriptOp::Command(opcode) => match driver.execute(*opcode) {
                Ok(result) => {
                    if trace {
                        println!("{:<6} {}", opcode.to_string().to_lowercase(), result);
                    }
                }
                Err(e) => {
                    // The device keeps running; the next command clears STATUS
                    println!("⚠️  {}: {}", opcode, e);
                    faults += 1;
                }
            },
            ScriptOp::ShowOutput => {
                println!("output {}", driver.read_output());
            }
            ScriptOp::ShowStatus => {
                println!("status {}", driver.status());
            }
        }
    }

    let device = driver.into_device();

    println!();
    println!("━━━ Result ━━━");
    println!("Stack depth: {}", device.stack.depth());
    println!("Status: {}", device.regs.status);
    println!("Faulted commands: {}", faults);

    if let Some(snapshot_path) = snapshot {
        let json = match serde_json::to_string_pretty(&device) {
            Ok(j) => j,
            Err(e) => {
                eprintln!("❌ Failed to serialize device state: {}", e);
                std::process::exit(1);
            }
        };
        if let Err(e) = std::fs::write(&snapshot_path, json) {
            eprintln!("❌ Failed to write snapshot: {}", e);
            std::process::exit(1);
        }
        println!("💾 Snapshot saved to {}", snapshot_path);
    }
}

fn run_demo() {
    use hanoi_coproc::{Coprocessor, HostDriver, Opcode, Trit, TritVector};

    println!("━━━ Coprocessor Walkthrough ━━━");
    println!();

    let mut driver = HostDriver::new(Coprocessor::new());
    let ones = TritVector::filled(Trit::P);

    println!("Loading the all-positive operand:");
    println!("  {}", ones);
    driver.load_operand(&ones);
    println!();

    println!("PUSH (five ticks: fetch, execute, writeback, done, idle):");
    match driver.execute(Opcode::Push) {
        Ok(result) => println!("  output = {}", result),
        Err(e) => println!("  ⚠️  {}", e),
    }
    println!("  stack depth = {}", driver.device().stack.depth());
    println!();

    println!("NOT (negates the top slot in place):");
    match driver.execute(Opcode::Not) {
        Ok(result) => println!("  output = {}", result),
        Err(e) => println!("  ⚠️  {}", e),
    }
    println!();

    println!("POP (drains the stack back to empty):");
    match driver.execute(Opcode::Pop) {
        Ok(result) => println!("  output = {}", result),
        Err(e) => println!("  ⚠️  {}", e),
    }
    println!("  stack depth = {}", driver.device().stack.depth());
    println!();

    println!("POP again (underflow is reported, not fatal):");
    match driver.execute(Opcode::Pop) {
        Ok(result) => println!("  output = {}", result),
        Err(e) => println!("  ⚠️  {}", e),
    }
    println!();

    println!("✓ One full session, status now: {}", driver.status());
}

fn demo_ternary_primitives() {
    use hanoi_coproc::ternary::{alu, codec};
    use hanoi_coproc::{Trit, TritVector};

    println!("━━━ Balanced Ternary Demo ━━━");
    println!();

    println!("Trits (single balanced ternary digits):");
    println!("  N = {:?} = {}", Trit::N, Trit::N.to_i8());
    println!("  O = {:?} = {}", Trit::O, Trit::O.to_i8());
    println!("  P = {:?} = {}", Trit::P, Trit::P.to_i8());
    println!();

    println!("Packed words (16 trits, 2 bits each):");
    let word = codec::encode_word(&[Trit::P, Trit::N, Trit::O, Trit::P]);
    println!("  [+1, -1, 0, +1] packs to 0x{:08X}", word);
    println!();

    println!("Lane-parallel addition (carries stay in their lanes):");
    let ones = TritVector::filled(Trit::P);
    let (sum, carries) = alu::add(&ones, &ones);
    println!("  lane 0: +1 + +1 = {} carry {}", sum.get(0), carries.get(0));
    println!();

    println!("✓ Core ternary primitives working!");
}

fn run_self_test() {
    use hanoi_coproc::ternary::{alu, codec};
    use hanoi_coproc::{Coprocessor, HostDriver, Opcode, Status, Trit, TritVector};

    println!("━━━ Coprocessor Self-Test ━━━");
    println!();

    let mut passed = 0;
    let mut failed = 0;

    // Test 1: Trit negation involution
    print!("Trit negation involution... ");
    let mut ok = true;
    for t in Trit::ALL {
        if t.neg().neg() != t {
            ok = false;
            break;
        }
    }
    if ok { println!("✓"); passed += 1; }
    else { println!("✗"); failed += 1; }

    // Test 2: Packed word roundtrip
    print!("Packed word roundtrip... ");
    let trits = [Trit::P, Trit::N, Trit::O, Trit::N, Trit::P];
    let mut decoded = [Trit::O; 5];
    codec::decode_word(codec::encode_word(&trits), &mut decoded);
    if decoded == trits { println!("✓"); passed += 1; }
    else { println!("✗"); failed += 1; }

    // Test 3: Lane add wrap
    print!("Lane add wrap (+1 + +1 = -1 carry +1)... ");
    let ones = TritVector::filled(Trit::P);
    let (sum, carries) = alu::add(&ones, &ones);
    if sum == TritVector::filled(Trit::N) && carries == TritVector::filled(Trit::P) {
        println!("✓");
        passed += 1;
    } else {
        println!("✗");
        failed += 1;
    }

    // Test 4: Full PUSH cycle
    print!("Full PUSH cycle... ");
    let mut driver = HostDriver::new(Coprocessor::new());
    driver.load_operand(&ones);
    match driver.execute(Opcode::Push) {
        Ok(result) if result == ones && driver.device().stack.depth() == 1 => {
            println!("✓");
            passed += 1;
        }
        _ => {
            println!("✗");
            failed += 1;
        }
    }

    // Test 5: Underflow reporting
    print!("ADD underflow flag... ");
    let mut driver = HostDriver::new(Coprocessor::new());
    match driver.execute(Opcode::Add) {
        Err(_) if driver.status().contains(Status::STACK_UNDERFLOW) => {
            println!("✓");
            passed += 1;
        }
        _ => {
            println!("✗");
            failed += 1;
        }
    }

    // Test 6: SHA3 placeholder rotation
    print!("SHA3 placeholder rotation... ");
    let mut input = TritVector::zero();
    input.set(1, Trit::N);
    let mut driver = HostDriver::new(Coprocessor::new());
    driver.load_operand(&input);
    match driver.execute(Opcode::Sha3) {
        Ok(result) if result.get(0) == Trit::N => {
            println!("✓");
            passed += 1;
        }
        _ => {
            println!("✗");
            failed += 1;
        }
    }

    println!();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Results: {} passed, {} failed", passed, failed);

    if failed == 0 {
        println!("✓ All tests passed!");
    } else {
        std::process::exit(1);
    }
}
