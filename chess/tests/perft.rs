//! Tests move generation against published perft results
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////

mod perft {
    use chess::Position;
    use chess::perft::{perft, PerftStats};

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 0";

    fn stats(fen: &str, depth: usize) -> PerftStats {
        let mut pos = Position::from_fen_str(fen).expect("valid fen");
        let original = pos.clone();
        let stats = perft(&mut pos, depth);
        assert_eq!(pos, original);
        stats
    }

    mod start_position {
        use super::*;
        use chess::STARTING_FEN;

        #[test]
        fn depth_1() { assert_eq!(stats(STARTING_FEN, 1).nodes, 20); }

        #[test]
        fn depth_2() { assert_eq!(stats(STARTING_FEN, 2).nodes, 400); }

        #[test]
        fn depth_3() {
            let stats = stats(STARTING_FEN, 3);
            assert_eq!(stats.nodes, 8902);
            assert_eq!(stats.captures, 34);
            assert_eq!(stats.en_passants, 0);
            assert_eq!(stats.castles, 0);
            assert_eq!(stats.checks, 12);
        }

        #[test]
        #[ignore]
        fn depth_4() {
            let stats = stats(STARTING_FEN, 4);
            assert_eq!(stats.nodes, 197281);
            assert_eq!(stats.captures, 1576);
            assert_eq!(stats.checks, 469);
        }
    }

    mod kiwipete {
        use super::*;

        #[test]
        fn depth_1() {
            let stats = stats(KIWIPETE, 1);
            assert_eq!(stats.nodes, 48);
            assert_eq!(stats.captures, 8);
            assert_eq!(stats.en_passants, 0);
            assert_eq!(stats.castles, 2);
            assert_eq!(stats.promotions, 0);
            assert_eq!(stats.checks, 0);
        }

        #[test]
        fn depth_2() {
            let stats = stats(KIWIPETE, 2);
            assert_eq!(stats.nodes, 2039);
            assert_eq!(stats.captures, 351);
            assert_eq!(stats.en_passants, 1);
            assert_eq!(stats.castles, 91);
            assert_eq!(stats.promotions, 0);
            assert_eq!(stats.checks, 3);
        }

        #[test]
        #[ignore]
        fn depth_3() {
            let stats = stats(KIWIPETE, 3);
            assert_eq!(stats.nodes, 97862);
            assert_eq!(stats.captures, 17102);
            assert_eq!(stats.en_passants, 45);
            assert_eq!(stats.castles, 3162);
            assert_eq!(stats.checks, 993);
        }
    }

    #[test]
    fn position_3_depth_4() {
        let stats = stats("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 4);
        assert_eq!(stats.nodes, 43238);
        assert_eq!(stats.captures, 3348);
        assert_eq!(stats.en_passants, 123);
        assert_eq!(stats.checks, 1680);
    }

    #[test]
    fn position_4_depth_3() {
        let stats = stats("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1", 3);
        assert_eq!(stats.nodes, 9467);
        assert_eq!(stats.captures, 1021);
        assert_eq!(stats.en_passants, 4);
        assert_eq!(stats.castles, 0);
        assert_eq!(stats.promotions, 120);
        assert_eq!(stats.checks, 38);
    }

    #[test]
    fn position_5_depth_3() {
        let fen = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";
        assert_eq!(stats(fen, 3).nodes, 62379);
    }

    #[test]
    fn castling_only_positions() {
        assert_eq!(stats("4k3/8/8/8/8/8/8/4K2R w K - 0 1", 4).nodes, 7059);
        assert_eq!(stats("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", 3).nodes, 13744);
    }
}
