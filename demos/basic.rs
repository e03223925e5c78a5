use rp_lib::{RewardsLedger, simulate};

fn main() {
    let mut ledger = RewardsLedger::new();
    for day in simulate::generate_days(123, 3, 10) {
        ledger.process_day(&day).unwrap();
    }
    println!("{}", ledger.to_json().unwrap());
}
