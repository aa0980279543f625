mod field_share {
    use ark_bn254::Fr;
    use ark_ff::Field;
    use ark_std::UniformRand;
    use itertools::izip;
    use tests::{run_parties, supply};
    use zkvm_mpc_core::protocols::additive::{self, FieldShare, arithmetic};
    use zkvm_mpc_storage::{RevealKey, RevealRole};

    #[test]
    fn add_is_local_and_correct() {
        let mut rng = rand::thread_rng();
        for n in [1, 2, 3, 5, 8] {
            let x = Fr::rand(&mut rng);
            let y = Fr::rand(&mut rng);
            let x_shares = additive::share_field_element(x, n, &mut rng);
            let y_shares = additive::share_field_element(y, n, &mut rng);
            let sums: Vec<FieldShare<Fr>> = izip!(&x_shares, &y_shares)
                .map(|(&x, &y)| arithmetic::add(x, y))
                .collect();
            assert_eq!(additive::combine_field_element(&sums), x + y);
        }
    }

    #[test]
    fn promote_and_add_public() {
        let mut rng = rand::thread_rng();
        let x = Fr::rand(&mut rng);
        let c = Fr::rand(&mut rng);
        let shares = additive::share_field_element(x, 3, &mut rng);
        let shifted: Vec<FieldShare<Fr>> = shares
            .iter()
            .enumerate()
            .map(|(id, &share)| arithmetic::add_public(share, c, id))
            .collect();
        assert_eq!(additive::combine_field_element(&shifted), x + c);
    }

    #[test]
    fn beaver_mul_over_various_party_counts() {
        let mut rng = rand::thread_rng();
        for n in [1, 2, 3, 5] {
            let x = Fr::rand(&mut rng);
            let y = Fr::rand(&mut rng);
            let x_shares = additive::share_field_element(x, n, &mut rng);
            let y_shares = additive::share_field_element(y, n, &mut rng);
            let results = run_parties::<Fr, _, _>(n, supply(1, 0, 0, 0), |mut state, session| {
                let product = arithmetic::mul(
                    x_shares[state.id],
                    y_shares[state.id],
                    RevealKey::indexed(0, RevealRole::MulFold, 1),
                    &session,
                    &mut state,
                )
                .unwrap();
                (product, state.prep.consumed())
            });
            let shares: Vec<_> = results.iter().map(|(share, _)| *share).collect();
            assert_eq!(additive::combine_field_element(&shares), x * y);
            for (_, consumed) in &results {
                assert_eq!(consumed.field_triples, 1);
            }
        }
    }

    #[test]
    fn inversion_matches_field_inverse() {
        let mut rng = rand::thread_rng();
        let x = Fr::rand(&mut rng);
        let shares = additive::share_field_element(x, 3, &mut rng);
        let results = run_parties::<Fr, _, _>(3, supply(600, 0, 0, 0), |mut state, session| {
            arithmetic::inv(shares[state.id], 0, &session, &mut state).unwrap()
        });
        assert_eq!(
            additive::combine_field_element(&results),
            x.inverse().unwrap()
        );
    }

    #[test]
    fn inversion_of_a_shared_zero_stays_zero() {
        let mut rng = rand::thread_rng();
        let shares = additive::share_field_element(Fr::from(0u64), 2, &mut rng);
        let results = run_parties::<Fr, _, _>(2, supply(600, 0, 0, 0), |mut state, session| {
            arithmetic::inv(shares[state.id], 0, &session, &mut state).unwrap()
        });
        assert_eq!(additive::combine_field_element(&results), Fr::from(0u64));
    }

    #[test]
    fn inversion_consumes_the_same_supply_on_every_party() {
        let mut rng = rand::thread_rng();
        let x = Fr::rand(&mut rng);
        let shares = additive::share_field_element(x, 3, &mut rng);
        let results = run_parties::<Fr, _, _>(3, supply(600, 0, 0, 0), |mut state, session| {
            arithmetic::inv(shares[state.id], 0, &session, &mut state).unwrap();
            state.prep.consumed()
        });
        assert_eq!(results[0], results[1]);
        assert_eq!(results[1], results[2]);
        assert!(results[0].field_triples > 0);
    }
}

mod binary_share {
    use ark_bn254::Fr;
    use tests::{run_parties, supply};
    use zkvm_mpc_core::protocols::additive::{self, BitShare, binary};
    use zkvm_mpc_storage::{RevealKey, RevealRole};

    #[test]
    fn xor_and_not_are_local() {
        let mut rng = rand::thread_rng();
        for (x, y) in [(false, false), (false, true), (true, false), (true, true)] {
            let x_shares = additive::share_bit(x, 3, &mut rng);
            let y_shares = additive::share_bit(y, 3, &mut rng);
            let xors: Vec<BitShare> = x_shares
                .iter()
                .zip(&y_shares)
                .map(|(&x, &y)| binary::xor(x, y))
                .collect();
            assert_eq!(additive::combine_bit(&xors), x ^ y);

            let nots: Vec<BitShare> = x_shares
                .iter()
                .enumerate()
                .map(|(id, &share)| binary::not(share, id))
                .collect();
            assert_eq!(additive::combine_bit(&nots), !x);
        }
    }

    #[test]
    fn beaver_and_over_all_bit_combinations() {
        let mut rng = rand::thread_rng();
        for (x, y) in [(false, false), (false, true), (true, false), (true, true)] {
            let x_shares = additive::share_bit(x, 2, &mut rng);
            let y_shares = additive::share_bit(y, 2, &mut rng);
            let results = run_parties::<Fr, _, _>(2, supply(0, 1, 0, 0), |mut state, session| {
                binary::and(
                    x_shares[state.id],
                    y_shares[state.id],
                    RevealKey::gated(0, RevealRole::BitSumCarry, 0, 1),
                    &session,
                    &mut state,
                )
                .unwrap()
            });
            assert_eq!(additive::combine_bit(&results), x & y);
        }
    }

    #[test]
    fn or_over_all_bit_combinations() {
        let mut rng = rand::thread_rng();
        for (x, y) in [(false, false), (false, true), (true, false), (true, true)] {
            let x_shares = additive::share_bit(x, 3, &mut rng);
            let y_shares = additive::share_bit(y, 3, &mut rng);
            let results = run_parties::<Fr, _, _>(3, supply(0, 1, 0, 0), |mut state, session| {
                binary::or(
                    x_shares[state.id],
                    y_shares[state.id],
                    RevealKey::gated(0, RevealRole::BitSumCarry, 0, 4),
                    &session,
                    &mut state,
                )
                .unwrap()
            });
            assert_eq!(additive::combine_bit(&results), x | y);
        }
    }

    fn to_bits(value: u32, len: usize) -> Vec<bool> {
        (0..len).map(|i| (value >> i) & 1 == 1).collect()
    }

    fn share_bits(
        bits: &[bool],
        num_parties: usize,
        rng: &mut (impl rand::Rng + rand::CryptoRng),
    ) -> Vec<Vec<BitShare>> {
        let per_bit: Vec<Vec<BitShare>> = bits
            .iter()
            .map(|&bit| additive::share_bit(bit, num_parties, rng))
            .collect();
        (0..num_parties)
            .map(|party| per_bit.iter().map(|shares| shares[party]).collect())
            .collect()
    }

    #[test]
    fn shared_adder_matches_integer_addition() {
        let mut rng = rand::thread_rng();
        let (a, b) = (48213u32, 17090u32);
        let lhs = share_bits(&to_bits(a, 16), 3, &mut rng);
        let rhs = share_bits(&to_bits(b, 16), 3, &mut rng);
        let results = run_parties::<Fr, _, _>(3, supply(0, 128, 0, 0), |mut state, session| {
            binary::bits_add(
                &lhs[state.id],
                &rhs[state.id],
                0,
                &session,
                &mut state,
                true,
            )
            .unwrap()
        });
        let combined: Vec<bool> = (0..17)
            .map(|i| additive::combine_bit(&results.iter().map(|bits| bits[i]).collect::<Vec<_>>()))
            .collect();
        let expected = to_bits(a + b, 17);
        assert_eq!(combined, expected);
    }

    #[test]
    fn public_addend_adder_matches_integer_addition() {
        let mut rng = rand::thread_rng();
        let (a, b) = (0xbeefu32, 0x1234u32);
        let lhs = share_bits(&to_bits(a, 16), 2, &mut rng);
        let results = run_parties::<Fr, _, _>(2, supply(0, 64, 0, 0), |mut state, session| {
            binary::bits_add_const(&lhs[state.id], &to_bits(b, 16), 0, &session, &mut state, true)
                .unwrap()
        });
        let combined: Vec<bool> = (0..17)
            .map(|i| additive::combine_bit(&results.iter().map(|bits| bits[i]).collect::<Vec<_>>()))
            .collect();
        assert_eq!(combined, to_bits(a + b, 17));
    }

    #[test]
    fn public_addend_adder_can_drop_the_carry() {
        let mut rng = rand::thread_rng();
        let (a, b) = (0xffffu32, 0x0001u32);
        let lhs = share_bits(&to_bits(a, 16), 2, &mut rng);
        let results = run_parties::<Fr, _, _>(2, supply(0, 64, 0, 0), |mut state, session| {
            binary::bits_add_const(&lhs[state.id], &to_bits(b, 16), 0, &session, &mut state, false)
                .unwrap()
        });
        let combined: Vec<bool> = (0..16)
            .map(|i| additive::combine_bit(&results.iter().map(|bits| bits[i]).collect::<Vec<_>>()))
            .collect();
        assert_eq!(combined, to_bits((a + b) & 0xffff, 16));
    }
}

mod conversion {
    use ark_bn254::Fr;
    use ark_std::UniformRand;
    use tests::{run_parties, supply};
    use zkvm_mpc_core::protocols::additive::{self, conversion};

    #[test]
    fn bit_decomposition_over_many_party_counts() {
        let mut rng = rand::thread_rng();
        for n in [2, 3, 4, 5, 7, 8, 11, 17] {
            let x = Fr::rand(&mut rng);
            let shares = additive::share_field_element(x, n, &mut rng);
            let results = run_parties::<Fr, _, _>(n, supply(0, 3000, 1, 0), |mut state, session| {
                let bits = conversion::a2b(shares[state.id], 0, &session, &mut state).unwrap();
                (bits, state.prep.consumed())
            });
            let expected = conversion::field_to_bits(x);
            let combined: Vec<bool> = (0..expected.len())
                .map(|i| {
                    additive::combine_bit(
                        &results.iter().map(|(bits, _)| bits[i]).collect::<Vec<_>>(),
                    )
                })
                .collect();
            assert_eq!(combined, expected, "bit decomposition broke for {n} parties");
            for (_, consumed) in &results {
                assert_eq!(consumed, &results[0].1, "parties consumed different supplies");
                assert_eq!(consumed.edabits, 1);
            }
        }
    }

    #[test]
    fn bit_decomposition_of_small_and_extreme_values() {
        let mut rng = rand::thread_rng();
        for value in [Fr::from(0u64), Fr::from(1u64), -Fr::from(1u64)] {
            let shares = additive::share_field_element(value, 3, &mut rng);
            let results = run_parties::<Fr, _, _>(3, supply(0, 3000, 1, 0), |mut state, session| {
                conversion::a2b(shares[state.id], 0, &session, &mut state).unwrap()
            });
            let expected = conversion::field_to_bits(value);
            let combined: Vec<bool> = (0..expected.len())
                .map(|i| {
                    additive::combine_bit(&results.iter().map(|bits| bits[i]).collect::<Vec<_>>())
                })
                .collect();
            assert_eq!(combined, expected);
        }
    }

    #[test]
    fn bit_to_arithmetic_conversion() {
        let mut rng = rand::thread_rng();
        for bit in [false, true] {
            let shares = additive::share_bit(bit, 4, &mut rng);
            let results = run_parties::<Fr, _, _>(4, supply(0, 0, 0, 1), |mut state, session| {
                conversion::b2a::<Fr, _, _>(shares[state.id], 7, &session, &mut state).unwrap()
            });
            assert_eq!(additive::combine_field_element(&results), Fr::from(bit));
        }
    }
}
