use proptest::prelude::*;
use rand::rngs::mock::StepRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use santa_core::{generate, Assignment, DerangeError, InvalidInput, Participant};
use std::collections::BTreeSet;

fn roster(count: usize) -> Vec<Participant> {
    (0..count)
        .map(|index| {
            Participant::new(format!("Person {index}"), format!("p{index}@example.com"))
                .with_field("wishlist", format!("item {index}"))
        })
        .collect()
}

fn assert_derangement(participants: &[Participant], assignment: &Assignment<Participant>) {
    assert_eq!(assignment.len(), participants.len());
    assert_eq!(assignment.fixed_points(), 0);

    let givers: Vec<_> = assignment.iter().map(|pairing| pairing.giver.id()).collect();
    let expected_givers: Vec<_> = participants.iter().map(Participant::id).collect();
    assert_eq!(givers, expected_givers, "givers must keep input order");

    let receivers: BTreeSet<_> = assignment
        .iter()
        .map(|pairing| pairing.receiver.id())
        .collect();
    let expected: BTreeSet<_> = participants.iter().map(Participant::id).collect();
    assert_eq!(receivers.len(), participants.len(), "receivers must be distinct");
    assert_eq!(receivers, expected);

    for pairing in assignment {
        assert_ne!(pairing.giver.id(), pairing.receiver.id());
    }
}

#[test]
fn empty_roster_is_invalid_input() {
    let err = generate::<Participant, _>(&[], &mut ChaCha8Rng::seed_from_u64(1)).unwrap_err();
    assert_eq!(
        err,
        DerangeError::InvalidInput(InvalidInput::TooFewParticipants { count: 0 })
    );
}

#[test]
fn single_participant_is_invalid_input() {
    let err = generate(&roster(1), &mut ChaCha8Rng::seed_from_u64(1)).unwrap_err();
    assert_eq!(
        err,
        DerangeError::InvalidInput(InvalidInput::TooFewParticipants { count: 1 })
    );
}

#[test]
fn two_participants_always_swap() {
    let people = roster(2);
    for seed in 0..200 {
        let assignment = generate(&people, &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();
        let pairings = assignment.pairings();
        assert_eq!(pairings[0].giver, people[0]);
        assert_eq!(pairings[0].receiver, people[1]);
        assert_eq!(pairings[1].giver, people[1]);
        assert_eq!(pairings[1].receiver, people[0]);
    }
}

#[test]
fn pinned_three_participant_draw() {
    let people = roster(3);
    let assignment = generate(&people, &mut StepRng::new(0, 0)).unwrap();
    let receivers: Vec<_> = assignment
        .iter()
        .map(|pairing| pairing.receiver.address.as_str())
        .collect();
    assert_eq!(
        receivers,
        vec!["p1@example.com", "p2@example.com", "p0@example.com"]
    );
}

#[test]
fn same_seed_reproduces_assignment() {
    let people = roster(25);
    let first = generate(&people, &mut ChaCha8Rng::seed_from_u64(2024)).unwrap();
    let second = generate(&people, &mut ChaCha8Rng::seed_from_u64(2024)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn caller_roster_is_left_untouched() {
    let people = roster(10);
    let snapshot = people.clone();
    let first = generate(&people, &mut ChaCha8Rng::seed_from_u64(7)).unwrap();
    assert_eq!(people, snapshot);

    // A second run over the same roster behaves like the first.
    let second = generate(&people, &mut ChaCha8Rng::seed_from_u64(7)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn payload_fields_travel_with_participants() {
    let people = roster(4);
    let assignment = generate(&people, &mut ChaCha8Rng::seed_from_u64(3)).unwrap();
    for pairing in &assignment {
        let index = pairing
            .receiver
            .address
            .trim_start_matches('p')
            .trim_end_matches("@example.com")
            .to_string();
        assert_eq!(
            pairing.receiver.field("wishlist"),
            Some(format!("item {index}").as_str())
        );
    }
}

#[test]
fn identity_is_address_not_display_name() {
    let people = vec![
        Participant::new("Sam", "sam.one@example.com"),
        Participant::new("Sam", "sam.two@example.com"),
    ];
    let assignment = generate(&people, &mut ChaCha8Rng::seed_from_u64(5)).unwrap();
    assert_eq!(assignment.pairings()[0].receiver.address, "sam.two@example.com");

    let aliased = vec![
        Participant::new("Ann", "ann@example.com"),
        Participant::new("Bob", "bob@example.com"),
        Participant::new("Annie", "ANN@example.com"),
    ];
    let err = generate(&aliased, &mut ChaCha8Rng::seed_from_u64(5)).unwrap_err();
    assert!(matches!(
        err,
        DerangeError::InvalidInput(InvalidInput::DuplicateIdentity {
            first: 0,
            second: 2,
            ..
        })
    ));
}

#[test]
fn receiver_of_finds_each_giver() {
    let people = roster(6);
    let assignment = generate(&people, &mut ChaCha8Rng::seed_from_u64(11)).unwrap();
    for pairing in &assignment {
        let receiver = assignment.receiver_of(&pairing.giver.id()).unwrap();
        assert_eq!(receiver, &pairing.receiver);
    }
}

#[test]
fn hundred_participants_over_a_thousand_seeds() {
    let people = roster(100);
    for seed in 0..1_000 {
        let assignment = generate(&people, &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();
        assert_derangement(&people, &assignment);
    }
}

#[test]
fn stress_sizes_terminate() {
    for (count, seed) in [(2, 1), (3, 2), (17, 3), (1_000, 4), (10_000, 5)] {
        let people = roster(count);
        let assignment = generate(&people, &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();
        assert_derangement(&people, &assignment);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn any_roster_yields_a_derangement(count in 2usize..64, seed in any::<u64>()) {
        let people = roster(count);
        let assignment = generate(&people, &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(assignment.len(), count);
        prop_assert_eq!(assignment.fixed_points(), 0);

        let receivers: BTreeSet<_> = assignment.iter().map(|p| p.receiver.id()).collect();
        prop_assert_eq!(receivers.len(), count);
    }

    #[test]
    fn any_seed_is_reproducible(count in 2usize..32, seed in any::<u64>()) {
        let people = roster(count);
        let first = generate(&people, &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();
        let second = generate(&people, &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(first, second);
    }
}
