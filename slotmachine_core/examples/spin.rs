use slotmachine_core::{Engine, MachineConfig};

fn main() {
    // Example session: fund, spin three lines at $5, show the outcome
    let mut engine = Engine::seeded(MachineConfig::default(), 2024).expect("default config");
    engine.deposit("100").expect("valid deposit");
    let result = engine.spin(3, "5").expect("funded spin");
    println!("{}", result.grid);
    println!("{}", result.summary());
    println!("Balance: ${}", engine.balance());
}
