use pcapng_gps::*;
use std::env;
use std::error::Error;
use std::fs;

fn main() {
    env_logger::init();
    for arg in env::args().skip(1) {
        if let Err(e) = print_gps_info(&arg) {
            eprintln!("Unable to read pcapng {}: {}", arg, e);
        }
    }
}

fn print_gps_info(arg: &str) -> Result<(), Box<dyn Error>> {
    println!("Name: {}", arg);

    let bytes = fs::read(arg)?;
    println!("\tfile size: {}", bytes.len());

    let mut packets = PacketIterator::from_slice(&bytes)
        .map_err(|e| format!("not a pcap-ng file: {:?}", e.map(|e| e.to_owned_vec())))?;

    let mut num_packets = 0;
    let mut section_printed = false;
    while let Some(packet) = packets.next() {
        let packet = match packet {
            Ok(packet) => packet,
            Err(e) => {
                eprintln!("\terror while reading: {:?}", e.map(|e| e.to_owned_vec()));
                break;
            }
        };
        if !section_printed {
            if let Some(info) = packets.section_info() {
                print_section_info(info);
            }
            section_printed = true;
        }
        num_packets += 1;
        print_packet(num_packets, &packet);
    }

    println!("\tnum_packets: {}", num_packets);
    println!("\tinterface count in file: {}", packets.interface_block_count());

    Ok(())
}

fn print_section_info(info: &SectionInfo) {
    println!("\tversion: {}.{}", info.major_version, info.minor_version);
    if let Some(comment) = &info.comment {
        println!("\tfile comment: {}", comment);
    }
    if let Some(os) = &info.os_desc {
        println!("\tos: {}", os);
    }
    if let Some(hardware) = &info.hardware_desc {
        println!("\thardware description: {}", hardware);
    }
    if let Some(app) = &info.user_app_desc {
        println!("\tuser app: {}", app);
    }
}

fn print_packet(index: usize, packet: &Packet) {
    let h = &packet.header;
    print!(
        "\tpacket #{}: orig_len={}, cap_len={}, iface_id={}, data_link={}, timestamp={}.{:06}",
        index,
        h.original_length,
        h.captured_length,
        h.interface_id,
        h.linktype,
        h.ts_sec,
        h.ts_usec()
    );
    match &h.comment {
        Some(comment) => println!(", comment={:?}", comment),
        None => println!(),
    }
    for field in &h.custom_fields {
        match field.kismet_gps() {
            Ok(Some(gps)) => println!(
                "\t\tkismet gps v1 {:?} len {} = Lat {}, Lon {}, Alt {}",
                field.field_type, field.length, gps.latitude, gps.longitude, gps.altitude
            ),
            Ok(None) => {
                let hex: Vec<_> = field.payload().iter().map(|b| format!("{:02x}", b)).collect();
                println!(
                    "\t\tgeneric custom {:?} len {} = {}",
                    field.field_type,
                    field.length,
                    hex.join(" ")
                );
            }
            Err(e) => println!("\t\tinvalid gps record {:?}: {}", field.field_type, e),
        }
    }
}
