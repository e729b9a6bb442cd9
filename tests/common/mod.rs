use tesseral::constants::{RADEG, SECONDS_PER_DAY, T1950};
use tesseral::equinoctial::EquinoctialOrbitState;
use tesseral::gravity_field::UnnormalizedGravityField;

/// Degree-7 unnormalized gravity field (EGM96-derived coefficients).
pub fn degree_seven_field() -> UnnormalizedGravityField {
    let c_table = vec![
        vec![1.0],
        vec![0.0, 0.0],
        vec![-1.0826269183e-3, -2.4140305197e-10, 1.5744597781e-6],
        vec![
            2.5324104998e-6,
            2.1927987959e-6,
            3.0904390216e-7,
            1.0055998135e-7,
        ],
        vec![
            1.6198977000e-6,
            -5.0864347564e-7,
            7.8374540382e-8,
            5.9215019756e-8,
            -3.9826203946e-9,
        ],
        vec![
            2.2775328768e-7,
            -5.3197331836e-8,
            1.0563660928e-7,
            -1.4928897435e-8,
            -2.2993832322e-9,
            4.3042780685e-10,
        ],
        vec![
            -5.4081718745e-7,
            -5.9865639578e-8,
            6.0495228355e-9,
            1.1854186728e-9,
            -3.2631648104e-10,
            -2.1557560454e-10,
            2.2549178968e-12,
        ],
        vec![
            3.5235976456e-7,
            2.0558837923e-7,
            3.2841724789e-8,
            3.5338857430e-9,
            -5.8517074697e-10,
            5.8276740654e-13,
            -2.4910450665e-11,
            2.5664665886e-14,
        ],
    ];
    let s_table = vec![
        vec![0.0],
        vec![0.0, 0.0],
        vec![0.0, 1.5429965651e-9, -9.0386801003e-7],
        vec![0.0, 2.6832145906e-7, -2.1143062941e-7, 1.9722344174e-7],
        vec![
            0.0,
            -4.4914471550e-7,
            1.4813503137e-7,
            -1.2009459854e-8,
            6.5246711362e-9,
        ],
        vec![
            0.0,
            -8.0858683845e-8,
            -5.2328123462e-8,
            -7.1009169979e-9,
            3.8781496856e-10,
            -1.6481954835e-9,
        ],
        vec![
            0.0,
            2.0684074588e-8,
            -4.6518388941e-8,
            1.8471822287e-10,
            -1.7842251695e-9,
            -4.3306815119e-10,
            -5.5259141086e-11,
        ],
        vec![
            0.0,
            6.9850242901e-8,
            9.2635894559e-9,
            -3.0604711786e-9,
            -2.6331028322e-10,
            6.3408250813e-12,
            1.0535761213e-11,
            4.4768749382e-13,
        ],
    ];

    UnnormalizedGravityField::new(3.986004415e14, 6378136.46, c_table, s_table).unwrap()
}

/// Inclined geosynchronous test orbit at a fixed 1997 epoch.
pub fn geosynchronous_orbit() -> EquinoctialOrbitState {
    // 17396 days and 35 seconds past 1950-01-01 (TAI)
    let epoch = T1950 + 17396.0 + 35.0 / SECONDS_PER_DAY;
    EquinoctialOrbitState::from_keplerian(
        epoch,
        42164200.0,
        0.004,
        45.0 * RADEG,
        7.0 * RADEG,
        12.0 * RADEG,
        200.0 * RADEG,
    )
}
