use proptest::prelude::*;
use suspensionlab_core::codec;
use suspensionlab_core::schema::{
    BikeConfiguration, CaptureSetup, Config, FrameGeometry, HardwareConfig, SpringType,
    SuspensionSetup, TireSetup, WheelsConfig,
};
use suspensionlab_core::validation::Validator;

fn suspension() -> impl Strategy<Value = SuspensionSetup> {
    (
        ".{0,12}",
        any::<u32>(),
        prop_oneof![Just(SpringType::Air), Just(SpringType::Coil)],
        prop::array::uniform6(any::<u32>()),
    )
        .prop_map(|(model, travel, spring, [pressure, sag, hsc, lsc, rebound, tokens])| {
            let mut setup = SuspensionSetup::default();
            setup.model = model;
            setup.travel = travel;
            setup.spring = spring;
            setup.pressure = pressure;
            setup.sag = sag;
            setup.hsc = hsc;
            setup.lsc = lsc;
            setup.rebound = rebound;
            setup.tokens = tokens;
            setup
        })
}

fn tire() -> impl Strategy<Value = TireSetup> {
    (
        ".{0,12}",
        prop_oneof![Just("tubeless".to_string()), Just("clincher".to_string()), ".{0,8}"],
        prop_oneof![
            -100.0f32..100.0f32,
            Just(0.0f32),
            Just(-0.0f32),
            Just(f32::INFINITY)
        ],
        prop_oneof![Just("bar".to_string()), Just("psi".to_string()), ".{0,4}"],
    )
        .prop_map(|(model, setup_type, pressure, pressure_unit)| {
            let mut tire = TireSetup::default();
            tire.model = model;
            tire.setup_type = setup_type;
            tire.pressure = pressure;
            tire.pressure_unit = pressure_unit;
            tire
        })
}

fn geometry() -> impl Strategy<Value = FrameGeometry> {
    prop_oneof![
        Just(FrameGeometry::rigid()),
        suspension().prop_map(FrameGeometry::hardtail),
        (suspension(), suspension())
            .prop_map(|(fork, shock)| FrameGeometry::full_suspension(fork, shock)),
    ]
}

fn bike() -> impl Strategy<Value = BikeConfiguration> {
    (
        geometry(),
        (".{0,12}", ".{0,12}"),
        tire(),
        tire(),
        (any::<u32>(), any::<u32>()),
    )
        .prop_map(|(geometry, (rims, material), front, rear, (sensors, freq))| {
            BikeConfiguration::new(
                geometry,
                WheelsConfig::new(rims, material),
                front,
                rear,
                HardwareConfig::new(sensors, freq),
            )
        })
}

fn session() -> impl Strategy<Value = Config> {
    (any::<u32>(), any::<u32>()).prop_map(|(count, rate)| Config::new(count, rate))
}

proptest! {
    #[test]
    fn capture_setup_round_trips(bike in bike(), session in session()) {
        let setup = CaptureSetup::new(session, bike);
        let bytes = codec::encode(&setup);
        let back: CaptureSetup = codec::decode(&bytes).unwrap();
        prop_assert_eq!(&back, &setup);
        prop_assert_eq!(codec::encode(&back), bytes);
    }

    #[test]
    fn validator_is_total(bike in bike(), session in session()) {
        let report = Validator::new().validate(&bike, &session);
        prop_assert!(report.errors.iter().all(|f| f.is_blocking()));
        prop_assert!(report.warnings.iter().all(|f| !f.is_blocking()));
    }

    #[test]
    fn validator_is_total_with_nan_pressure(bike in bike(), session in session()) {
        let mut bike = bike;
        bike.rear_tire.pressure = f32::NAN;
        let _ = Validator::new().validate(&bike, &session);
    }

    #[test]
    fn decode_never_panics(data in proptest::collection::vec(any::<u8>(), 0..256)) {
        let _ = codec::decode::<CaptureSetup>(&data);
        let _ = codec::decode::<BikeConfiguration>(&data);
        let _ = codec::decode::<SuspensionSetup>(&data);
    }
}
