#![allow(dead_code)]

pub mod trajectories {
    pub const DIALA_NM: &str = "tests/trajectories/diala_3frames_nm.xyz";
    pub const DIALA_A: &str = "tests/trajectories/diala_3frames_A.xyz";
    pub const BAD_BOX: &str = "tests/trajectories/bad_box.xyz";
    pub const BAD_ATOM: &str = "tests/trajectories/bad_atom.xyz";
    pub const TRUNCATED: &str = "tests/trajectories/truncated.xyz";

    /// The number of frames in each of the trajectories above, when complete.
    pub const NFRAMES: usize = 3;
    pub const NATOMS: usize = 22;
}

/// Pairs of equal lengths in nanometers and Angstroms, as written by the converter.
pub const LENGTHS: [(&str, &str); 8] = [
    ("0.123", "1.23"),
    ("0.456", "4.56"),
    ("0.789", "7.89"),
    ("1.0", "10.0"),
    ("-0.05", "-0.5"),
    ("2.5012", "25.012"),
    ("0.0015", "0.015"),
    ("-1.2", "-12.0"),
];

/// Build a trajectory of `nframes` frames with `natoms` atoms each, returning the text in
/// nanometers and the text in Angstroms.
pub fn synthetic_trajectory(nframes: usize, natoms: usize) -> (String, String) {
    let mut nm = String::new();
    let mut angstrom = String::new();
    let mut n = 0;
    let mut next = || {
        n += 1;
        LENGTHS[n % LENGTHS.len()]
    };
    for frame in 0..nframes {
        nm.push_str(&format!("{natoms}\n"));
        angstrom.push_str(&format!("{natoms}\n"));
        let (b_nm, b_a) = next();
        nm.push_str(&format!("{b_nm} {b_nm} {b_nm}\n"));
        angstrom.push_str(&format!("{b_a} {b_a} {b_a}\n"));
        for atom in 0..natoms {
            let label = format!("A{frame}_{atom}");
            let (x_nm, x_a) = next();
            let (y_nm, y_a) = next();
            let (z_nm, z_a) = next();
            nm.push_str(&format!("{label} {x_nm} {y_nm} {z_nm}\n"));
            angstrom.push_str(&format!("{label} {x_a} {y_a} {z_a}\n"));
        }
    }
    (nm, angstrom)
}
