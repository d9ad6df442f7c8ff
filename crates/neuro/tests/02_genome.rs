mod common;

use common::rng;
use neuro::{Genome, LayerSizes, Network, NeuroError, Tensor};

#[test]
fn genome_nesting_matches_exchange_format() {
    let network = Network::new(&[5, 6, 4, 2], &mut rng(1)).unwrap();
    let genome = network.to_genome();
    assert_eq!(genome.layer_sizes, vec![5, 6, 4, 2]);
    assert_eq!(genome.weights.len(), 3);
    assert_eq!(genome.weights[0].len(), 5);
    assert_eq!(genome.weights[0][0].len(), 6);
    assert_eq!(genome.biases[2].len(), 1);
    assert_eq!(genome.biases[2][0].len(), 2);

    let json: serde_json::Value = serde_json::from_str(&genome.to_json().unwrap()).unwrap();
    assert!(json["biases"][0][0].is_array());
    assert_eq!(json["layer_sizes"], serde_json::json!([5, 6, 4, 2]));
}

#[test]
fn import_of_export_is_bit_identical() {
    let mut rng = rng(2);
    let mut network = Network::new(&[5, 6, 4, 2], &mut rng).unwrap();
    network.mutate(1.0, 0.4, &mut rng);
    let restored = Network::from_genome(&network.to_genome()).unwrap();

    let input = Tensor::from_rows(&[vec![0.1, 0.9, 0.4, 0.0, 1.0], vec![0.7; 5]]).unwrap();
    let a = network.forward(&input).unwrap();
    let b = restored.forward(&input).unwrap();
    let bits = |t: &Tensor| t.data().iter().map(|v| v.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&a), bits(&b));
}

#[test]
fn json_round_trip_is_lossless() {
    let network = Network::new(&[3, 4, 2], &mut rng(3)).unwrap();
    let genome = network.to_genome();
    let parsed = Genome::from_json(&genome.to_json_pretty().unwrap()).unwrap();
    assert_eq!(parsed, genome);
    assert_eq!(Network::from_genome(&parsed).unwrap(), network);
}

#[test]
fn load_genome_adopts_new_topology() {
    let mut network = Network::new(&[3, 2], &mut rng(4)).unwrap();
    let other = Network::new(&[5, 6, 4, 2], &mut rng(5)).unwrap();
    network.load_genome(&other.to_genome()).unwrap();
    assert_eq!(network.layer_sizes().as_slice(), &[5, 6, 4, 2]);
    assert_eq!(network, other);
}

#[test]
fn malformed_genomes_are_rejected() {
    let mut genome = Network::new(&[3, 4, 2], &mut rng(6)).unwrap().to_genome();
    genome.weights[1].pop();
    assert!(matches!(Network::from_genome(&genome), Err(NeuroError::MalformedGenome(_))));

    let mut genome = Network::new(&[3, 4, 2], &mut rng(6)).unwrap().to_genome();
    genome.biases[0] = vec![vec![0.0; 4], vec![0.0; 4]];
    assert!(matches!(genome.validate(), Err(NeuroError::MalformedGenome(_))));

    let mut genome = Network::new(&[3, 4, 2], &mut rng(6)).unwrap().to_genome();
    genome.layer_sizes = vec![3];
    assert!(matches!(genome.validate(), Err(NeuroError::InvalidTopology(_))));

    assert!(Genome::from_json(r#"{"layer_sizes":[2,1],"weights":[[[1.0]]],"biases":[[[0.0]]]}"#).is_err());
}

#[test]
fn check_topology_reports_mismatch() {
    let genome = Network::new(&[3, 4, 2], &mut rng(7)).unwrap().to_genome();
    let expected = LayerSizes::new(vec![3, 5, 2]).unwrap();
    assert!(matches!(
        genome.check_topology(&expected),
        Err(NeuroError::TopologyMismatch { .. })
    ));
    assert!(genome.check_topology(&LayerSizes::new(vec![3, 4, 2]).unwrap()).is_ok());
}
