pub mod const_prop;
