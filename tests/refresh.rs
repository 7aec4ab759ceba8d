#![cfg(feature = "host")]
#![allow(missing_docs, reason = "integration test crate")]
//! Host-level tests for matrix construction, pixel access, and refresh.

use neopixel_matrix::{
    ConfigError, Error,
    color::{self, ChannelOrder, Gamma},
    matrix::{MatrixConfig, NeopixelMatrix, Region, layout::{Rotation, Wiring}},
    transport::{StripTransport, Transport, TransportError, Triple},
};
use smart_leds::{RGB8, SmartLedsWrite};

/// Records every slot write and counts transmissions.
#[derive(Debug)]
struct Recorder {
    slots: Vec<Triple>,
    writes: Vec<usize>,
    transmits: usize,
    fail: bool,
}

impl Recorder {
    fn new(len: usize) -> Self {
        Self {
            slots: vec![[0; 3]; len],
            writes: Vec::new(),
            transmits: 0,
            fail: false,
        }
    }
}

impl Transport for Recorder {
    fn len(&self) -> usize {
        self.slots.len()
    }

    fn set_slot(&mut self, index: usize, triple: Triple) {
        self.slots[index] = triple;
        self.writes.push(index);
    }

    fn transmit(&mut self) -> Result<(), TransportError> {
        if self.fail {
            return Err(TransportError::Write);
        }
        self.transmits += 1;
        Ok(())
    }
}

fn rgb_config(width: usize, height: usize) -> MatrixConfig {
    MatrixConfig::new(width, height)
        .with_order(ChannelOrder::Rgb)
        .with_brightness(1.0)
}

#[test]
fn defaults_follow_reference_driver() {
    let config = MatrixConfig::new(4, 4);
    assert_eq!(config.wiring, Wiring::Linear);
    assert_eq!(config.rotation, Rotation::Deg0);
    assert!(!config.flip_h && !config.flip_v);
    assert_eq!(config.order, ChannelOrder::Brg);
    assert!((config.brightness - 0.2).abs() < f32::EPSILON);
    assert_eq!(config.gamma, Gamma::LINEAR);
    assert_eq!(config.balance, [1.0; 3]);
}

#[test]
fn invalid_construction_is_rejected() {
    let cases = [
        (MatrixConfig::new(0, 4), ConfigError::ZeroDimension),
        (MatrixConfig::new(4, 4).with_brightness(1.5), ConfigError::Brightness),
        (
            MatrixConfig::new(4, 2).with_rotation(Rotation::Deg90),
            ConfigError::RotationRequiresSquare,
        ),
        (
            MatrixConfig::new(4, 4).with_gamma(Gamma::uniform(0.0)),
            ConfigError::Gamma,
        ),
        (
            MatrixConfig::new(4, 4).with_balance([1.0, -1.0, 1.0]),
            ConfigError::Balance,
        ),
    ];
    for (config, expected) in cases {
        assert_eq!(config.validate(), Err(expected));
        let result = NeopixelMatrix::<_, 16>::new(config, Recorder::new(16));
        assert_eq!(result.err(), Some(Error::Config(expected)));
    }
}

#[test]
fn rotation_45_never_becomes_a_config() {
    assert_eq!(Rotation::try_from(45_u16), Err(ConfigError::Rotation(45)));
}

#[test]
fn capacity_and_transport_length_are_checked() {
    let too_big = NeopixelMatrix::<_, 8>::new(MatrixConfig::new(3, 3), Recorder::new(9));
    assert_eq!(
        too_big.err(),
        Some(Error::Config(ConfigError::CapacityExceeded {
            needed: 9,
            capacity: 8
        }))
    );

    let short = NeopixelMatrix::<_, 16>::new(MatrixConfig::new(4, 4), Recorder::new(15));
    assert_eq!(
        short.err(),
        Some(Error::Config(ConfigError::TransportTooShort {
            needed: 16,
            available: 15
        }))
    );
}

#[test]
fn pixel_access_is_bounds_checked() {
    let mut matrix = NeopixelMatrix::<_, 8>::new(rgb_config(4, 2), Recorder::new(8)).expect("valid");
    matrix.set_pixel(3, 1, color::BLUE).expect("inside");
    assert_eq!(matrix.pixel(3, 1), Ok(color::BLUE));

    let outside = Error::OutOfBounds {
        x: 4,
        y: 0,
        width: 4,
        height: 2,
    };
    assert_eq!(matrix.set_pixel(4, 0, color::RED), Err(outside));
    assert_eq!(matrix.pixel(4, 0), Err(outside));
}

#[test]
fn show_transmits_once_with_every_slot() {
    let config = rgb_config(4, 2).with_wiring(Wiring::Serpentine);
    let mut matrix = NeopixelMatrix::<_, 8>::new(config, Recorder::new(8)).expect("valid");
    matrix.set_pixel(0, 1, color::RED).expect("inside");

    matrix.show().expect("transmit");

    let transport = matrix.transport();
    assert_eq!(transport.transmits, 1);
    assert_eq!(transport.writes.len(), 8);
    // (0, 1) on a serpentine 4x2 panel is slot 7.
    assert_eq!(transport.slots[7], [248, 0, 0]);
    assert!(transport.slots[..7].iter().all(|slot| *slot == [0, 0, 0]));
}

#[test]
fn brightness_and_order_apply_at_refresh() {
    let mut matrix =
        NeopixelMatrix::<_, 4>::new(MatrixConfig::new(2, 2), Recorder::new(4)).expect("valid");
    matrix.fill(color::RED);
    matrix.show().expect("transmit");
    assert_eq!(matrix.transport().slots[0], [0, 49, 0]);

    matrix.set_order(ChannelOrder::Rgb);
    matrix.set_brightness(1.0).expect("valid");
    matrix.show().expect("transmit");
    assert_eq!(matrix.transport().slots[3], [248, 0, 0]);
    assert_eq!(matrix.config().order, ChannelOrder::Rgb);
}

#[test]
fn failed_setter_keeps_configuration() {
    let mut matrix =
        NeopixelMatrix::<_, 4>::new(MatrixConfig::new(2, 2), Recorder::new(4)).expect("valid");
    assert_eq!(
        matrix.set_brightness(f32::NAN),
        Err(Error::Config(ConfigError::Brightness))
    );
    assert_eq!(
        matrix.set_gamma(Gamma::uniform(-1.0)),
        Err(Error::Config(ConfigError::Gamma))
    );
    assert!((matrix.config().brightness - 0.2).abs() < f32::EPSILON);
    assert!((matrix.pipeline().brightness() - 0.2).abs() < f32::EPSILON);
    assert_eq!(matrix.config().gamma, Gamma::LINEAR);
}

#[test]
fn region_refresh_writes_only_the_region() {
    let mut matrix = NeopixelMatrix::<_, 16>::new(rgb_config(4, 4), Recorder::new(16)).expect("valid");
    matrix.fill(color::GREEN);

    matrix.show_region(Region::new(1, 1, 2, 3)).expect("valid region");

    let transport = matrix.transport();
    assert_eq!(transport.transmits, 1);
    assert_eq!(transport.writes, vec![5, 6, 9, 10, 13, 14]);
    assert_eq!(transport.slots[5], [0, 252, 0]);
    assert_eq!(transport.slots[0], [0, 0, 0]);
}

#[test]
fn single_cell_region_is_valid() {
    let mut matrix = NeopixelMatrix::<_, 4>::new(rgb_config(2, 2), Recorder::new(4)).expect("valid");
    matrix.show_region(Region::new(1, 1, 1, 1)).expect("valid region");
    assert_eq!(matrix.transport().writes, vec![3]);
}

#[test]
fn bad_regions_are_rejected_before_any_write() {
    let mut matrix = NeopixelMatrix::<_, 16>::new(rgb_config(4, 4), Recorder::new(16)).expect("valid");
    for region in [
        Region::new(2, 0, 1, 3),
        Region::new(0, 3, 3, 2),
        Region::new(0, 0, 4, 3),
        Region::new(0, 0, 3, 4),
    ] {
        assert_eq!(
            matrix.show_region(region),
            Err(Error::InvalidRegion {
                x1: region.x1,
                y1: region.y1,
                x2: region.x2,
                y2: region.y2,
            })
        );
    }
    assert!(matrix.transport().writes.is_empty());
    assert_eq!(matrix.transport().transmits, 0);
}

#[test]
fn transport_failure_surfaces() {
    let mut matrix = NeopixelMatrix::<_, 4>::new(rgb_config(2, 2), Recorder::new(4)).expect("valid");
    matrix.transport_mut().fail = true;
    assert_eq!(matrix.show(), Err(Error::Transport(TransportError::Write)));
}

#[test]
fn longer_transport_keeps_extra_slots() {
    let mut matrix = NeopixelMatrix::<_, 4>::new(rgb_config(2, 2), Recorder::new(6)).expect("valid");
    matrix.fill(color::WHITE);
    matrix.show().expect("transmit");
    let transport = matrix.into_transport();
    assert_eq!(transport.slots[3], [248, 252, 248]);
    assert_eq!(transport.slots[4], [0, 0, 0]);
}

/// A `SmartLedsWrite` driver that keeps the last frame it was given.
#[derive(Default)]
struct FakeWs2812 {
    frames: Vec<Vec<RGB8>>,
}

impl SmartLedsWrite for FakeWs2812 {
    type Error = ();
    type Color = RGB8;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        self.frames.push(iterator.into_iter().map(Into::into).collect());
        Ok(())
    }
}

#[test]
fn strip_transport_hands_triples_to_the_driver() {
    let config = rgb_config(2, 2).with_order(ChannelOrder::Grb);
    let transport = StripTransport::<_, 4>::new(FakeWs2812::default());
    let mut matrix = NeopixelMatrix::<_, 4>::new(config, transport).expect("valid");
    matrix.set_pixel(1, 0, color::RED).expect("inside");
    matrix.show().expect("transmit");

    assert_eq!(matrix.transport().slots()[1], RGB8::new(0, 248, 0));
    assert_eq!(matrix.transport().writer().frames.len(), 1);

    matrix.show().expect("transmit");
    assert_eq!(matrix.transport().writer().frames.len(), 2);
    let driver = matrix.into_transport().into_inner();
    assert_eq!(driver.frames.len(), 2);
    assert_eq!(driver.frames[0].len(), 4);
    assert_eq!(driver.frames[0][1], RGB8::new(0, 248, 0));
    assert_eq!(driver.frames[1], driver.frames[0]);
}
