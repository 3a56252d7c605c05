//! End-to-end tests across the whole suite: registry construction from a
//! demo config, policy-gated dispatch through the codec, and the pad
//! synchronization contract between two ends of a conversation.

use rand::rngs::StdRng;
use rand::SeedableRng;

use cipherdeck::classical::vigenere::normalize;
use cipherdeck::{
    AlgorithmId, AlgorithmRegistry, CipherError, MessageCodec, SuiteConfig, UserClass,
};

fn demo_registry(seed: u64) -> AlgorithmRegistry {
    let mut rng = StdRng::seed_from_u64(seed);
    let config = SuiteConfig::demo(&mut rng);
    AlgorithmRegistry::from_config(&config, &mut rng).expect("demo config must build")
}

#[test]
fn every_class_round_trips_its_own_algorithms() {
    let registry = demo_registry(1);
    let codec = MessageCodec::new(&registry);
    for class in [
        UserClass::Classical,
        UserClass::Asymmetric,
        UserClass::Symmetric,
    ] {
        for &algorithm in class.permitted_algorithms() {
            let plaintext: &[u8] = match algorithm {
                AlgorithmId::Blowfish => b"ONEBLOCK",
                _ => b"MEETATMIDNIGHT",
            };
            let message = codec.encrypt(class, algorithm, "demo", plaintext).unwrap();
            assert_eq!(message.algorithm, algorithm);
            let decrypted = codec.decrypt(class, &message).unwrap();
            assert_eq!(decrypted, plaintext, "{algorithm:?}");
        }
    }
}

#[test]
fn cross_class_requests_are_all_refused() {
    let registry = demo_registry(2);
    let codec = MessageCodec::new(&registry);
    for class in [
        UserClass::Classical,
        UserClass::Asymmetric,
        UserClass::Symmetric,
    ] {
        for algorithm in AlgorithmId::ALL {
            if class.permitted_algorithms().contains(&algorithm) {
                continue;
            }
            let outcome = codec.encrypt(class, algorithm, "intruder", b"IRRELEVANT");
            assert!(
                matches!(outcome, Err(CipherError::Unauthorized { .. })),
                "{class:?} must not reach {algorithm:?}"
            );
        }
    }
}

#[test]
fn lossy_normalization_is_visible_through_the_codec() {
    let registry = demo_registry(3);
    let codec = MessageCodec::new(&registry);
    let raw = "Hello. This message is encrypted.";
    let message = codec
        .encrypt(
            UserClass::Classical,
            AlgorithmId::Vigenere,
            "demo",
            raw.as_bytes(),
        )
        .unwrap();
    let decrypted = codec.decrypt(UserClass::Classical, &message).unwrap();
    // punctuation, spacing and case are gone; the normalized text survives
    assert_eq!(decrypted, normalize(raw).into_bytes());
}

#[test]
fn caesar_preserves_what_vigenere_loses() {
    let registry = demo_registry(4);
    let codec = MessageCodec::new(&registry);
    let raw = b"Hello. This message is encrypted.";
    let message = codec
        .encrypt(UserClass::Classical, AlgorithmId::Caesar, "demo", raw)
        .unwrap();
    assert_eq!(
        codec.decrypt(UserClass::Classical, &message).unwrap(),
        raw
    );
}

#[test]
fn pad_conversation_stays_in_sync_page_by_page() {
    let registry = demo_registry(5);
    let codec = MessageCodec::new(&registry);
    let lines: [&[u8]; 3] = [b"first line", b"second line", b"third line"];
    let mut sent = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        registry.set_pad_page(i + 1).unwrap();
        sent.push(
            codec
                .encrypt(UserClass::Symmetric, AlgorithmId::OneTimePad, "a", line)
                .unwrap(),
        );
    }
    // the receiving side replays the same page sequence
    for (i, (message, line)) in sent.iter().zip(lines).enumerate() {
        registry.set_pad_page(i + 1).unwrap();
        assert_eq!(
            codec.decrypt(UserClass::Symmetric, message).unwrap(),
            line
        );
    }
}

#[test]
fn desynchronized_pad_garbles_irrecoverably() {
    let registry = demo_registry(6);
    let codec = MessageCodec::new(&registry);
    registry.set_pad_page(1).unwrap();
    let message = codec
        .encrypt(UserClass::Symmetric, AlgorithmId::OneTimePad, "a", b"page one secret")
        .unwrap();
    registry.advance_pad_page().unwrap();
    let garbled = codec.decrypt(UserClass::Symmetric, &message).unwrap();
    assert_ne!(garbled, b"page one secret");
}

#[test]
fn corrupt_ciphertexts_are_reported_not_substituted() {
    let registry = demo_registry(7);
    let codec = MessageCodec::new(&registry);
    let mut message = codec
        .encrypt(UserClass::Asymmetric, AlgorithmId::Rsa, "demo", b"hi")
        .unwrap();
    message.ciphertext.pop();
    assert!(matches!(
        codec.decrypt(UserClass::Asymmetric, &message),
        Err(CipherError::CorruptCiphertext(_))
    ));
}

#[test]
fn registries_are_independent_instances() {
    // two registries from the same config seed still differ where key
    // material is drawn at construction (permuted alphabet, RSA pair)
    let a = demo_registry(8);
    let b = demo_registry(9);
    let ciphertext_a = a.encrypt(AlgorithmId::CaesarPermuted, b"SAMEPLAINTEXT").unwrap();
    let plain_a = a.decrypt(AlgorithmId::CaesarPermuted, &ciphertext_a).unwrap();
    assert_eq!(plain_a, b"SAMEPLAINTEXT");
    // b cannot generally decrypt a's output: separate configurations
    let plain_b = b.decrypt(AlgorithmId::CaesarPermuted, &ciphertext_a).unwrap();
    assert_ne!(plain_b, b"SAMEPLAINTEXT");
}

#[test]
fn failed_call_leaves_the_suite_usable() {
    let registry = demo_registry(10);
    let codec = MessageCodec::new(&registry);
    let failed = codec.encrypt(UserClass::Symmetric, AlgorithmId::Blowfish, "x", b"bad length");
    assert!(failed.is_err());
    let message = codec
        .encrypt(UserClass::Symmetric, AlgorithmId::Blowfish, "x", b"GOODSIZE")
        .unwrap();
    assert_eq!(
        codec.decrypt(UserClass::Symmetric, &message).unwrap(),
        b"GOODSIZE"
    );
}
