#![no_main]
use dayweight_ledger::{Ledger, LedgerConfig, OrderingPolicy};
use dayweight_shares::ShareCalculator;
use dayweight_types::{ParticipantId, Timestamp};
use libfuzzer_sys::fuzz_target;

// Each 4-byte chunk is one operation:
// [participant | kind bit, amount_hi, amount_lo, day gap]
fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 || data.is_empty() {
        return;
    }

    let permit = data[0] & 1 == 1;
    let config = LedgerConfig {
        ordering: if permit {
            OrderingPolicy::Permit
        } else {
            OrderingPolicy::Reject
        },
        ..LedgerConfig::default()
    };
    let mut ledger = Ledger::with_config(&config);
    let mut day: i64 = 0;

    for chunk in data[1..].chunks_exact(4) {
        let participant = ParticipantId::new([chunk[0] & 0x0f; 32]);
        let amount = u64::from(u16::from_be_bytes([chunk[1], chunk[2]]));
        // Signed gap so permitted ledgers also see backdated events.
        day = (day + i64::from(chunk[3] as i8)).max(0);
        let moment = Timestamp::from_day(day as u64);

        let before = ledger.len();
        let result = if chunk[0] & 0x80 == 0 {
            ledger.deposit(participant, amount, moment)
        } else {
            ledger.withdraw(participant, amount, moment)
        };
        if result.is_err() {
            assert_eq!(ledger.len(), before);
        }
        assert!(ledger.total_balance(&participant) >= 0);
    }

    let calc = ShareCalculator::new(&ledger);
    let until = ledger.latest_deposit_day() + 1;
    let weights: Option<u128> = ledger
        .participants()
        .iter()
        .map(|p| calc.weight_for_participant(p, until).ok())
        .sum();

    // Ordered ledgers keep the snapshot table consistent with participant weights.
    if !permit {
        assert_eq!(weights, calc.total_weight_at(until).ok());
    }
});
