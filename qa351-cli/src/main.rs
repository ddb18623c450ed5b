use qa351::{Config, Counts, HidTransport, Mode, Qa351, SampleRate};
use structopt::StructOpt;

fn main() {
    pretty_env_logger::init();

    let args = Opt::from_args();

    let mut config = Config::default();
    if let Some(v) = args.vid {
        config = config.vendor_id(v);
    }
    if let Some(p) = args.pid {
        config = config.product_id(p);
    }
    if let Some(t) = args.timeout {
        config = config.timeout_ms(t);
    }

    let mut qa = Qa351::open(config).expect("Are you sure the QA351 is plugged in?");

    println!("found {:?}", qa.transport().device().get_product_string());

    match args.cmd {
        Cmd::info => info(&qa),
        Cmd::volts => {
            let counts = qa.read_voltage_counts().expect("read_voltage_counts failed");
            print_counts("Voltage Counts", counts);
        }
        Cmd::rms => {
            qa.set_mode(Mode::Rms).expect("set_mode failed");
            qa.start_rms_conversion()
                .expect("start_rms_conversion failed");
            let counts = qa.read_rms_counts().expect("read_rms_counts failed");
            print_counts("RMS Counts", counts);
        }
        Cmd::stream => {
            let stream = qa.read_voltage_stream().expect("read_voltage_stream failed");
            for sample in stream.iter() {
                println!("{:3} {}", sample.sequence_id, sample.value);
            }
        }
        Cmd::atten { level } => qa.set_atten(level).expect("set_atten failed"),
        Cmd::pga { gain } => qa.set_pga(gain).expect("set_pga failed"),
        Cmd::rate { fast } => {
            let rate = if fast {
                SampleRate::Fast
            } else {
                SampleRate::Slow
            };
            qa.set_sample_rate(rate).expect("set_sample_rate failed")
        }
        Cmd::led => qa.kick_led().expect("kick_led failed"),
        Cmd::reset => qa.reset().expect("reset failed"),
        Cmd::bsl => qa.enter_bsl().expect("enter_bsl failed"),
    }
}

fn info(qa: &Qa351<HidTransport>) {
    let firmware = qa.get_firmware_version().expect("get_firmware_version failed");
    println!("Firmware Version: {:02X?}", firmware);

    let product = qa.get_product_id().expect("get_product_id failed");
    println!("Product ID: {:02X?}", product);

    let temp = qa.get_msp_temp().expect("get_msp_temp failed");
    println!("MSP Temperature: {:02X?}", temp);

    let depth = qa.get_fifo_depth().expect("get_fifo_depth failed");
    println!("FIFO Depth: {:02X?}", depth);
}

fn print_counts(label: &str, counts: Counts) {
    match counts {
        Counts::Value(val) => println!("{}: {}", label, val),
        Counts::Invalid => println!("{}: invalid ({:#010x})", label, counts.raw()),
    }
}

fn parse_hex_16(input: &str) -> Result<u16, std::num::ParseIntError> {
    if input.starts_with("0x") {
        u16::from_str_radix(&input[2..], 16)
    } else {
        input.parse::<u16>()
    }
}

#[allow(non_camel_case_types)]
#[derive(StructOpt, Debug, PartialEq)]
pub enum Cmd {
    /// Firmware version, serial number, msp430 temperature and fifo depth
    info,

    /// Single dc conversion
    volts,

    /// Switch to rms mode, start a conversion and read it back
    rms,

    /// Drain a block of samples from the fifo
    stream,

    /// Set the input attenuator
    atten { level: u8 },

    /// Set the programmable gain amplifier
    pga { gain: u8 },

    /// Set the sample rate, slow unless --fast is given
    rate {
        #[structopt(long = "fast")]
        fast: bool,
    },

    /// Blink the front panel led
    led,

    /// Reset the instrument
    reset,

    /// Enter the msp430 bootstrap loader for a firmware update
    bsl,
}

#[derive(Debug, StructOpt)]
#[structopt(name = "qa351", about = "QA351 voltage and rms meter")]
struct Opt {
    #[structopt(subcommand)]
    cmd: Cmd,

    #[structopt(short = "p", name = "pid", long = "pid", parse(try_from_str = parse_hex_16))]
    pid: Option<u16>,
    #[structopt(short = "v", name = "vid", long = "vid", parse(try_from_str = parse_hex_16))]
    vid: Option<u16>,
    /// Report read timeout in milliseconds
    #[structopt(short = "t", name = "timeout", long = "timeout")]
    timeout: Option<i32>,
}
