use molalign::prelude::*;
use molalign::matching::query::MoleculeQuery;
use nalgebra::{Point3, Rotation3, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Returns the same correspondences for any query.
pub struct FixedOracle(pub Vec<Correspondence>);

impl CorrespondenceOracle for FixedOracle {
    fn substruct_matches(&self, _: &Molecule, _: &MoleculeQuery, _: &MatchParams) -> Vec<Correspondence> {
        self.0.clone()
    }
}

pub fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

pub fn random_transform(rng: &mut StdRng) -> RigidTransform {
    let rot = Rotation3::from_euler_angles(
        rng.gen_range(-3.0..3.0),
        rng.gen_range(-1.5..1.5),
        rng.gen_range(-3.0..3.0),
    );
    let shift = Vector3::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0));
    RigidTransform::new(*rot.matrix(), shift)
}

pub fn transformed(points: &[Point3<f64>], trans: &RigidTransform) -> Vec<Point3<f64>> {
    points.iter().map(|p| trans.apply(p)).collect()
}

pub fn assert_points_close(a: &[Point3<f64>], b: &[Point3<f64>], tol: f64) {
    assert_eq!(a.len(), b.len());
    for (i, (p, q)) in a.iter().zip(b).enumerate() {
        assert!((p - q).norm() < tol, "atom {}: {:?} vs {:?}", i, p, q);
    }
}

// N-CA-C(=O)[O-], atom order: N, CA, C, O (double), O (charged)
pub fn glycinate_positions() -> Vec<Point3<f64>> {
    vec![
        Point3::new(-0.7, 1.2, 0.0),
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.5, 0.0, 0.0),
        Point3::new(2.2, 1.1, 0.0),
        Point3::new(2.2, -1.1, 0.0),
    ]
}

pub fn glycinate(positions: Vec<Point3<f64>>) -> Molecule {
    let mut mol = Molecule::with_name("glycinate");
    let n = mol.add_atom(Atom::new(7));
    let ca = mol.add_atom(Atom::new(6));
    let c = mol.add_atom(Atom::new(6));
    let o1 = mol.add_atom(Atom::new(8));
    let o2 = mol.add_atom(Atom::with_charge(8, -1));
    mol.add_bond(n, ca, BondOrder::Single).unwrap();
    mol.add_bond(ca, c, BondOrder::Single).unwrap();
    mol.add_bond(c, o1, BondOrder::Double).unwrap();
    mol.add_bond(c, o2, BondOrder::Single).unwrap();
    mol.add_conformer(positions).unwrap();
    mol
}

// CH3-C(=O)[O-] with the oxygens placed symmetrically about the C-C axis
pub fn acetate_positions() -> Vec<Point3<f64>> {
    vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.5, 0.0, 0.0),
        Point3::new(2.2, 1.1, 0.0),
        Point3::new(2.2, -1.1, 0.0),
    ]
}

pub fn acetate(positions: Vec<Point3<f64>>) -> Molecule {
    let mut mol = Molecule::with_name("acetate");
    let c1 = mol.add_atom(Atom::new(6));
    let c2 = mol.add_atom(Atom::new(6));
    let o1 = mol.add_atom(Atom::new(8));
    let o2 = mol.add_atom(Atom::with_charge(8, -1));
    mol.add_bond(c1, c2, BondOrder::Single).unwrap();
    mol.add_bond(c2, o1, BondOrder::Double).unwrap();
    mol.add_bond(c2, o2, BondOrder::Single).unwrap();
    mol.add_conformer(positions).unwrap();
    mol
}

/// Unbonded carbons; only useful with explicit or fixed correspondences.
pub fn point_cloud(positions: Vec<Point3<f64>>) -> Molecule {
    let mut mol = Molecule::with_name("cloud");
    for _ in 0..positions.len() {
        mol.add_atom(Atom::new(6));
    }
    mol.add_conformer(positions).unwrap();
    mol
}

pub fn four_point_positions() -> Vec<Point3<f64>> {
    vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.2, 0.0, 0.0),
        Point3::new(0.4, 1.7, 0.0),
        Point3::new(0.3, 0.5, 2.1),
    ]
}
